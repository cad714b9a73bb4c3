// src/handlers/reviews.rs
// DOCUMENTATION: HTTP handler for site reviews
// PURPOSE: Serve the testimonial carousel on the landing page

use crate::db::ReviewRepository;
use crate::errors::BookingError;
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

/// GET /reviews
/// All site reviews, newest first
pub async fn list_reviews(pool: web::Data<PgPool>) -> Result<impl Responder, BookingError> {
    let reviews = ReviewRepository::list_site_reviews(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

/// Configuration for review routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/reviews", web::get().to(list_reviews));
}
