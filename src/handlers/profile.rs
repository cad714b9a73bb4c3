// src/handlers/profile.rs
// DOCUMENTATION: HTTP handlers for account profile management
// PURPOSE: Name/email updates, password changes and account deletion

use crate::db::UserRepository;
use crate::errors::BookingError;
use crate::models::{
    DeleteAccountRequest, MessageResponse, UpdatePasswordRequest, UpdateProfileRequest,
};
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// PUT /profile/info
/// Update name and email
pub async fn update_info(
    pool: web::Data<PgPool>,
    req: web::Json<UpdateProfileRequest>,
) -> Result<impl Responder, BookingError> {
    if let Err(e) = req.validate() {
        return Err(BookingError::ValidationError(e.to_string()));
    }

    if UserRepository::email_taken(pool.get_ref(), &req.email, req.id).await? {
        return Err(BookingError::AlreadyExists(format!(
            "Email {} is already in use",
            req.email
        )));
    }

    UserRepository::update_info(pool.get_ref(), req.id, &req.first_name, &req.last_name, &req.email)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Profile updated successfully".to_string(),
    }))
}

/// PUT /profile/password
/// Verify the current password and store the new hash
pub async fn update_password(
    pool: web::Data<PgPool>,
    req: web::Json<UpdatePasswordRequest>,
) -> Result<impl Responder, BookingError> {
    if let Err(e) = req.validate() {
        return Err(BookingError::ValidationError(e.to_string()));
    }

    let current_hash = UserRepository::get_password_hash(pool.get_ref(), req.id).await?;

    let matches = bcrypt::verify(&req.old_password, &current_hash)
        .map_err(|e| BookingError::InternalError(format!("Password verification failed: {}", e)))?;
    if !matches {
        return Err(BookingError::Unauthorized);
    }

    let new_hash = bcrypt::hash(&req.new_password, bcrypt::DEFAULT_COST)
        .map_err(|e| BookingError::InternalError(format!("Password hashing failed: {}", e)))?;

    UserRepository::set_password_hash(pool.get_ref(), req.id, &new_hash).await?;

    log::info!("Password changed for user {}", req.id);

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}

/// DELETE /profile
pub async fn delete_account(
    pool: web::Data<PgPool>,
    req: web::Json<DeleteAccountRequest>,
) -> Result<impl Responder, BookingError> {
    UserRepository::delete(pool.get_ref(), req.id).await?;

    log::info!("Deleted account {}", req.id);

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Account deleted".to_string(),
    }))
}

/// Configuration for profile routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .route("/info", web::put().to(update_info))
            .route("/password", web::put().to(update_password))
            .route("", web::delete().to(delete_account)),
    );
}
