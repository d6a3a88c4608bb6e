//! Account and authentication types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role attached to a marketplace account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Buyer,
    Seller,
    Dealer,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Buyer => "Buyer",
            UserRole::Seller => "Seller",
            UserRole::Dealer => "Dealer",
        }
    }
}

/// A marketplace account as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "userid")]
    pub user_id: i64,
    pub user_firstname: String,
    pub user_lastname: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    pub user_role: UserRole,
    /// True once both email and phone are verified.
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub phone_verified: bool,
    pub date_joined: DateTime<Utc>,
}

/// Access/refresh token pair issued on login and register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_deserializes_backend_shape() {
        let json = r#"{
            "userid": 42,
            "user_firstname": "Ada",
            "user_lastname": "Moreno",
            "full_name": "Ada Moreno",
            "email": "ada@example.com",
            "phone_number": "+35799123456",
            "user_role": "seller",
            "is_verified": true,
            "email_verified": true,
            "phone_verified": true,
            "date_joined": "2025-03-01T12:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_id, 42);
        assert_eq!(user.user_role, UserRole::Seller);
        assert!(user.is_verified);
    }

    #[test]
    fn user_tolerates_missing_optional_flags() {
        let json = r#"{
            "userid": 1,
            "user_firstname": "B",
            "user_lastname": "C",
            "full_name": "B C",
            "email": "b@example.com",
            "user_role": "buyer",
            "date_joined": "2025-01-01T00:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(!user.is_verified);
        assert!(user.phone_number.is_empty());
    }
}
