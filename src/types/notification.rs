//! Notification types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a notification, used for display glyphs and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    System,
    Chat,
    Report,
    Payment,
    Listing,
    Review,
    Verification,
}

impl NotificationKind {
    pub fn glyph(&self) -> &'static str {
        match self {
            NotificationKind::System => "◆",
            NotificationKind::Chat => "✉",
            NotificationKind::Report => "⚑",
            NotificationKind::Payment => "¤",
            NotificationKind::Listing => "⌂",
            NotificationKind::Review => "★",
            NotificationKind::Verification => "✓",
        }
    }
}

/// A notification entry for the current account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub notif_id: i64,
    pub notif_title: String,
    pub notif_message: String,
    pub notif_type: NotificationKind,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(rename = "createdat")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
}
