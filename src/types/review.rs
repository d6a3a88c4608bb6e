//! Seller review types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

/// A rating-and-comment review left for a seller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "ratingrev_id")]
    pub review_id: i64,
    pub reviewer: User,
    /// 1..=5 stars.
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "createdat")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedat")]
    pub updated_at: DateTime<Utc>,
}
