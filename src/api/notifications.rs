//! Notification endpoints.

use serde::Deserialize;

use super::{ApiClient, ApiError};
use crate::types::Notification;

/// Full feed as the backend groups it.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationFeed {
    pub unread_count: u32,
    pub unread: Vec<Notification>,
    pub read: Vec<Notification>,
}

#[derive(Debug, Deserialize)]
struct UnreadCountResponse {
    unread_count: u32,
}

impl ApiClient {
    pub async fn notifications(&self) -> Result<NotificationFeed, ApiError> {
        self.require_auth()?;
        self.get_json("/notifications/", &[]).await
    }

    pub async fn unread_notification_count(&self) -> Result<u32, ApiError> {
        self.require_auth()?;
        let response: UnreadCountResponse =
            self.get_json("/notifications/unread-count/", &[]).await?;
        Ok(response.unread_count)
    }

    pub async fn mark_notification_read(&self, id: i64) -> Result<(), ApiError> {
        self.require_auth()?;
        self.put_unit(&format!("/notifications/{id}/read/")).await
    }

    pub async fn mark_all_notifications_read(&self) -> Result<(), ApiError> {
        self.require_auth()?;
        self.put_unit("/notifications/read-all/").await
    }

    pub async fn delete_notification(&self, id: i64) -> Result<(), ApiError> {
        self.require_auth()?;
        self.delete_unit(&format!("/notifications/{id}/")).await
    }

    /// Deletes every already-read notification.
    pub async fn clear_read_notifications(&self) -> Result<(), ApiError> {
        self.require_auth()?;
        self.delete_unit("/notifications/clear-all/").await
    }
}
