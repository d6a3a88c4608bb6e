//! Typed client for the marketplace REST backend.
//!
//! One module per endpoint group, mirroring the backend's URL layout.
//! Every call returns a named response type; see [`ApiError`] for the
//! failure taxonomy.

mod client;
mod error;

pub mod auth;
pub mod dealers;
pub mod listings;
pub mod messages;
pub mod notifications;
pub mod reviews;

pub use auth::AuthResponse;
pub use client::ApiClient;
pub use dealers::DealerApplicationState;
pub use error::ApiError;
pub use listings::{ListingFilter, ListingPage};
pub use notifications::NotificationFeed;
pub use reviews::ReviewSummary;

use async_trait::async_trait;

/// The slice of the API the background poller needs. A trait seam so the
/// poller can be driven by a mock in tests.
#[async_trait]
pub trait UnreadSource: Send + Sync {
    async fn notification_unread_count(&self) -> Result<u32, ApiError>;
    async fn chat_unread_count(&self) -> Result<u32, ApiError>;
}

#[async_trait]
impl UnreadSource for ApiClient {
    async fn notification_unread_count(&self) -> Result<u32, ApiError> {
        self.unread_notification_count().await
    }

    async fn chat_unread_count(&self) -> Result<u32, ApiError> {
        self.unread_message_count().await
    }
}
