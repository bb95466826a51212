//! User Model

use serde::{Deserialize, Serialize};

/// User row (internal; carries the password hash, never serialized out)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub phonenumber: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub created_at: i64,
}

/// Public profile view of a user (no credential material)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub phonenumber: Option<String>,
    pub address: Option<String>,
    pub role: String,
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phonenumber: Option<String>,
    pub address: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Partial profile update (absent fields keep their current value)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub phonenumber: Option<String>,
    pub address: Option<String>,
}
