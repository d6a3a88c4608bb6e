//! Authentication and verification endpoints.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::types::{TokenPair, User};

/// Payload for `POST /auth/register/`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub user_firstname: String,
    pub user_lastname: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by both register and login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
    pub tokens: TokenPair,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    pub message: String,
    #[serde(default)]
    pub is_fully_verified: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Which verification code to resend.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeType {
    Email,
    Phone,
}

impl ApiClient {
    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/register/", req).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post_json("/auth/login/", &req).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.require_auth()?;
        let _: MessageResponse = self.post_empty("/auth/logout/").await?;
        Ok(())
    }

    pub async fn profile(&self) -> Result<User, ApiError> {
        self.require_auth()?;
        self.get_json("/auth/profile/", &[]).await
    }

    pub async fn verify_email(&self, code: &str) -> Result<VerifyResponse, ApiError> {
        self.require_auth()?;
        self.post_json("/auth/verify-email/", &serde_json::json!({ "code": code }))
            .await
    }

    pub async fn verify_phone(&self, code: &str) -> Result<VerifyResponse, ApiError> {
        self.require_auth()?;
        self.post_json("/auth/verify-phone/", &serde_json::json!({ "code": code }))
            .await
    }

    pub async fn resend_code(&self, code_type: CodeType) -> Result<MessageResponse, ApiError> {
        self.require_auth()?;
        self.post_json(
            "/auth/resend-code/",
            &serde_json::json!({ "code_type": code_type }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_decodes_user_and_tokens() {
        let json = serde_json::json!({
            "message": "Login successful",
            "user": {
                "userid": 7, "user_firstname": "A", "user_lastname": "K",
                "full_name": "A K", "email": "a@example.com",
                "user_role": "buyer", "date_joined": "2025-01-01T00:00:00Z"
            },
            "tokens": { "access": "acc", "refresh": "ref" }
        });
        let auth: AuthResponse = serde_json::from_value(json).unwrap();
        assert_eq!(auth.user.user_id, 7);
        assert_eq!(auth.tokens.access, "acc");
        assert_eq!(auth.tokens.refresh, "ref");
    }

    #[test]
    fn verify_response_tolerates_missing_flag() {
        let done: VerifyResponse =
            serde_json::from_str(r#"{"message":"ok","is_fully_verified":true}"#).unwrap();
        assert!(done.is_fully_verified);
        let partial: VerifyResponse = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert!(!partial.is_fully_verified);
    }

    #[test]
    fn register_payload_carries_both_passwords() {
        let req = RegisterRequest {
            user_firstname: "A".into(),
            user_lastname: "K".into(),
            email: "a@example.com".into(),
            phone_number: "+35799123456".into(),
            password: "s3cret".into(),
            password_confirm: "s3cret".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["password"], value["password_confirm"]);
        assert_eq!(value["phone_number"], "+35799123456");
    }

    #[test]
    fn code_type_serializes_snake_case() {
        assert_eq!(serde_json::to_value(CodeType::Email).unwrap(), "email");
        assert_eq!(serde_json::to_value(CodeType::Phone).unwrap(), "phone");
    }
}
