// src/db/payment_repository.rs
// DOCUMENTATION: Payment settings database operations
// PURPOSE: Read and update the advance percentage (single-row table)

use crate::errors::BookingError;
use sqlx::PgPool;

pub struct PaymentSettingsRepository;

impl PaymentSettingsRepository {
    /// Current advance percentage
    /// DOCUMENTATION: Returns NotFound when the row was never configured
    pub async fn get_percent(pool: &PgPool) -> Result<i32, BookingError> {
        let row: Option<(i32,)> =
            sqlx::query_as("SELECT value FROM payment_settings LIMIT 1")
                .fetch_optional(pool)
                .await
                .map_err(|e| {
                    log::error!("Failed to fetch advance percentage: {}", e);
                    BookingError::DatabaseError(e.to_string())
                })?;

        row.map(|r| r.0)
            .ok_or_else(|| BookingError::NotFound("advance percentage".to_string()))
    }

    /// Update the advance percentage, inserting the row on first use
    pub async fn set_percent(pool: &PgPool, value: i32) -> Result<(), BookingError> {
        let rows = sqlx::query("UPDATE payment_settings SET value = $1 WHERE id = 1")
            .bind(value)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to update advance percentage: {}", e);
                BookingError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            sqlx::query("INSERT INTO payment_settings (id, value) VALUES (1, $1)")
                .bind(value)
                .execute(pool)
                .await
                .map_err(|e| {
                    log::error!("Failed to insert advance percentage: {}", e);
                    BookingError::DatabaseError(e.to_string())
                })?;
        }

        log::info!("Advance percentage set to {}%", value);
        Ok(())
    }
}
