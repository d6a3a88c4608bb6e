//! Seller review endpoints.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::types::Review;

/// Aggregate plus individual reviews for one seller.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSummary {
    pub average_rating: f64,
    pub total_reviews: u64,
    pub reviews: Vec<Review>,
}

/// Payload for `POST /reviews/create/`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateReviewRequest {
    pub reviewed_userid: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<i64>,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReviewEnvelope {
    review: Review,
}

impl ApiClient {
    pub async fn reviews_for_user(&self, user_id: i64) -> Result<ReviewSummary, ApiError> {
        self.get_json(&format!("/reviews/user/{user_id}/"), &[])
            .await
    }

    pub async fn create_review(&self, req: &CreateReviewRequest) -> Result<Review, ApiError> {
        self.require_auth()?;
        let envelope: ReviewEnvelope = self.post_json("/reviews/create/", req).await?;
        Ok(envelope.review)
    }
}
