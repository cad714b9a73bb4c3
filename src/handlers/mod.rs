// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components and share the admin guard

pub mod health;
pub mod payments;
pub mod profile;
pub mod reservations;
pub mod reviews;
pub mod tours;

pub use health::config as health_config;
pub use payments::config as payments_config;
pub use profile::config as profile_config;
pub use reservations::config as reservations_config;
pub use reviews::config as reviews_config;
pub use tours::config as tours_config;

use crate::config::Config;
use crate::errors::BookingError;
use actix_web::HttpRequest;

/// Helper function to verify admin authentication
/// DOCUMENTATION: Checks X-Admin-Token header against configured admin token
pub(crate) fn verify_admin_token(req: &HttpRequest, config: &Config) -> Result<(), BookingError> {
    let token = req
        .headers()
        .get("X-Admin-Token")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            log::warn!("Admin request without token");
            BookingError::Unauthorized
        })?;

    if token != config.admin_token {
        log::warn!("Admin request with invalid token");
        return Err(BookingError::Forbidden);
    }

    Ok(())
}
