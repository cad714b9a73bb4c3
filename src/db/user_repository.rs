// src/db/user_repository.rs
// DOCUMENTATION: Account database operations
// PURPOSE: Profile updates, password rotation and account deletion

use crate::errors::BookingError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    /// Check whether an email is used by a different account
    /// DOCUMENTATION: Guards profile updates against address collisions
    pub async fn email_taken(
        pool: &PgPool,
        email: &str,
        exclude_id: Uuid,
    ) -> Result<bool, BookingError> {
        let row: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM users WHERE email = $1 AND id != $2")
                .bind(email)
                .bind(exclude_id)
                .fetch_optional(pool)
                .await
                .map_err(|e| {
                    log::error!("Email lookup failed: {}", e);
                    BookingError::DatabaseError(e.to_string())
                })?;

        Ok(row.is_some())
    }

    /// Update name and email
    pub async fn update_info(
        pool: &PgPool,
        id: Uuid,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<(), BookingError> {
        let rows = sqlx::query(
            "UPDATE users SET first_name = $1, last_name = $2, email = $3 WHERE id = $4",
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Profile update failed for user {}: {}", id, e);
            BookingError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if rows == 0 {
            return Err(BookingError::NotFound(id.to_string()));
        }

        log::info!("Updated profile for user {}", id);
        Ok(())
    }

    /// Current password hash of an account
    pub async fn get_password_hash(pool: &PgPool, id: Uuid) -> Result<String, BookingError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT password_hash FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await
                .map_err(|e| {
                    log::error!("Password lookup failed for user {}: {}", id, e);
                    BookingError::DatabaseError(e.to_string())
                })?;

        row.map(|r| r.0)
            .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }

    /// Store a new password hash
    pub async fn set_password_hash(
        pool: &PgPool,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), BookingError> {
        let rows = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Password update failed for user {}: {}", id, e);
                BookingError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(BookingError::NotFound(id.to_string()));
        }

        log::info!("Password rotated for user {}", id);
        Ok(())
    }

    /// Delete an account
    /// DOCUMENTATION: Reservations keep their rows; user_id is nulled by FK
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), BookingError> {
        let rows = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Account deletion failed for user {}: {}", id, e);
                BookingError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(BookingError::NotFound(id.to_string()));
        }

        log::info!("Deleted account {}", id);
        Ok(())
    }
}
