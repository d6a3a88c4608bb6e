//! Chat and message endpoints.

use serde::Deserialize;

use super::{ApiClient, ApiError};
use crate::types::{Chat, Message};

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    data: Message,
}

#[derive(Debug, Deserialize)]
struct CreateChatResponse {
    chat: Chat,
}

#[derive(Debug, Deserialize)]
struct UnreadCountResponse {
    unread_count: u32,
}

impl ApiClient {
    pub async fn chats(&self) -> Result<Vec<Chat>, ApiError> {
        self.require_auth()?;
        self.get_json("/chats/", &[]).await
    }

    pub async fn chat_messages(&self, chat_id: i64) -> Result<Vec<Message>, ApiError> {
        self.require_auth()?;
        self.get_json(&format!("/chats/{chat_id}/messages/"), &[])
            .await
    }

    pub async fn send_message(&self, chat_id: i64, content: &str) -> Result<Message, ApiError> {
        self.require_auth()?;
        let response: SendMessageResponse = self
            .post_json(
                &format!("/chats/{chat_id}/messages/send/"),
                &serde_json::json!({ "content": content, "message_type": "text" }),
            )
            .await?;
        Ok(response.data)
    }

    pub async fn create_chat(&self, listing_id: i64) -> Result<Chat, ApiError> {
        self.require_auth()?;
        let response: CreateChatResponse = self
            .post_json(
                "/chats/create/",
                &serde_json::json!({ "listing_id": listing_id }),
            )
            .await?;
        Ok(response.chat)
    }

    pub async fn mark_chat_read(&self, chat_id: i64) -> Result<(), ApiError> {
        self.require_auth()?;
        self.put_unit(&format!("/chats/{chat_id}/mark-read/")).await
    }

    pub async fn unread_message_count(&self) -> Result<u32, ApiError> {
        self.require_auth()?;
        let response: UnreadCountResponse = self.get_json("/chats/unread-count/", &[]).await?;
        Ok(response.unread_count)
    }
}
