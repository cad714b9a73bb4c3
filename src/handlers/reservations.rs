// src/handlers/reservations.rs
// DOCUMENTATION: HTTP handlers for the booking flow
// PURPOSE: Parse requests, call services, return responses

use super::verify_admin_token;
use crate::config::Config;
use crate::db::ReservationRepository;
use crate::errors::BookingError;
use crate::models::{
    CreateDailyReservationRequest, MyReservationsQuery, ReservationCreatedResponse,
    UpdateReservationStatusRequest,
};
use crate::services::BookingService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// POST /reservations/daily
/// Book a daily tour with its traveler list
pub async fn create_daily(
    pool: web::Data<PgPool>,
    req: web::Json<CreateDailyReservationRequest>,
) -> Result<impl Responder, BookingError> {
    // Validate request (traveler fields included via nested validation)
    if let Err(e) = req.validate() {
        return Err(BookingError::ValidationError(e.to_string()));
    }

    let reservation_id =
        BookingService::create_daily_reservation(pool.get_ref(), req.into_inner()).await?;

    log::info!("Created reservation {}", reservation_id);

    Ok(HttpResponse::Created().json(ReservationCreatedResponse {
        success: true,
        reservation_id,
    }))
}

/// GET /reservations/me?user_id=...
/// Reservations of one account, newest first
pub async fn my_reservations(
    pool: web::Data<PgPool>,
    query: web::Query<MyReservationsQuery>,
) -> Result<impl Responder, BookingError> {
    let reservations = ReservationRepository::get_for_user(pool.get_ref(), query.user_id).await?;
    Ok(HttpResponse::Ok().json(reservations))
}

/// GET /reservations/{id}
pub async fn get_reservation(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, BookingError> {
    let reservation = ReservationRepository::get_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(reservation))
}

/// GET /reservations (admin)
/// Back-office listing of all reservations
pub async fn list_reservations(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
) -> Result<impl Responder, BookingError> {
    verify_admin_token(&http_req, &config)?;

    let reservations = ReservationRepository::list_all(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(reservations))
}

/// PUT /reservations/{id}/status (admin)
/// Approve or reject after reviewing a bank-transfer receipt
pub async fn update_status(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateReservationStatusRequest>,
) -> Result<impl Responder, BookingError> {
    verify_admin_token(&http_req, &config)?;

    if !req.is_valid_status() {
        return Err(BookingError::InvalidInput(format!(
            "Unknown reservation status '{}'",
            req.status
        )));
    }

    let id = path.into_inner();
    ReservationRepository::set_status(pool.get_ref(), id, &req.status).await?;

    log::info!("Reservation {} set to {}", id, req.status);

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Status updated" })))
}

/// Configuration for reservation routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reservations")
            .route("", web::get().to(list_reservations))
            .route("/daily", web::post().to(create_daily))
            .route("/me", web::get().to(my_reservations))
            .route("/{id}", web::get().to(get_reservation))
            .route("/{id}/status", web::put().to(update_status)),
    );
}
