//! Chat and message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

/// A buyer/seller conversation attached to a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub chat_id: i64,
    pub buyer: User,
    pub seller: User,
    pub listing_id: i64,
    #[serde(default)]
    pub listing_title: String,
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_message: Option<Message>,
    #[serde(default)]
    pub unread_count: u32,
}

impl Chat {
    /// The other participant, from the perspective of `user_id`.
    pub fn counterparty(&self, user_id: i64) -> &User {
        if self.buyer.user_id == user_id {
            &self.seller
        } else {
            &self.buyer
        }
    }
}

/// One message inside a chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub sender: User,
    pub content: String,
    #[serde(default = "default_message_type")]
    pub message_type: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(rename = "sentat")]
    pub sent_at: DateTime<Utc>,
}

fn default_message_type() -> String {
    "text".to_string()
}
