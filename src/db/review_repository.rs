// src/db/review_repository.rs
// DOCUMENTATION: Site review database operations
// PURPOSE: Feed the landing-page review marquee

use crate::errors::BookingError;
use crate::models::SiteReview;
use sqlx::PgPool;

pub struct ReviewRepository;

impl ReviewRepository {
    /// All site reviews, newest first
    pub async fn list_site_reviews(pool: &PgPool) -> Result<Vec<SiteReview>, BookingError> {
        sqlx::query_as::<_, SiteReview>(
            "SELECT id, name, date, text, rating FROM site_reviews ORDER BY date DESC",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch site reviews: {}", e);
            BookingError::DatabaseError(e.to_string())
        })
    }
}
