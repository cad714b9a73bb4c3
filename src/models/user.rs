// src/models/user.rs
// DOCUMENTATION: Account models and profile management DTOs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Account row
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Request DTO for PUT /profile/info
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    pub id: Uuid,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,
}

/// Request DTO for PUT /profile/password
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    pub id: Uuid,

    #[validate(length(min = 1))]
    pub old_password: String,

    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Request DTO for DELETE /profile
#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    pub id: Uuid,
}

/// Generic acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
