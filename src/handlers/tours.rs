// src/handlers/tours.rs
// DOCUMENTATION: HTTP handlers for the tour catalog
// PURPOSE: Parse requests, call services, return responses

use super::verify_admin_token;
use crate::config::Config;
use crate::db::TourRepository;
use crate::errors::BookingError;
use crate::models::{
    CreateTourRequest, ProgramDayInput, TourDateInput, TourListQuery, UpdateTourInfoRequest,
    UpdateTourRequest,
};
use crate::services::TourService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Request body for the departure-dates partial update
#[derive(Debug, Deserialize)]
pub struct UpdateDatesRequest {
    pub available_dates: Vec<TourDateInput>,
}

/// Request body for the program partial update
#[derive(Debug, Deserialize)]
pub struct UpdateProgramRequest {
    pub program: Vec<ProgramDayInput>,
}

/// Request body for the highlights partial update
#[derive(Debug, Deserialize)]
pub struct UpdateHighlightsRequest {
    pub highlights: Vec<String>,
}

/// Request body for the destinations partial update
#[derive(Debug, Deserialize)]
pub struct UpdateDestinationsRequest {
    pub destinations: Vec<String>,
}

/// Request body for the images partial update
/// DOCUMENTATION: main_image = None keeps the current main image
#[derive(Debug, Deserialize)]
pub struct UpdateImagesRequest {
    pub main_image: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
}

/// POST /tours
/// Create a new tour (admin)
pub async fn create_tour(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    req: web::Json<CreateTourRequest>,
) -> Result<impl Responder, BookingError> {
    verify_admin_token(&http_req, &config)?;

    // Validate request
    if let Err(e) = req.validate() {
        return Err(BookingError::ValidationError(e.to_string()));
    }

    let id = TourService::create_tour(pool.get_ref(), req.into_inner()).await?;

    log::info!("Created tour {}", id);

    Ok(HttpResponse::Created().json(serde_json::json!({ "id": id })))
}

/// GET /tours
/// Paginated, filterable catalog listing
pub async fn list_tours(
    pool: web::Data<PgPool>,
    query: web::Query<TourListQuery>,
) -> Result<impl Responder, BookingError> {
    let result = TourService::list_tours(pool.get_ref(), query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /tours/{id}
/// Full tour detail with program, highlights, gallery and dates
pub async fn get_tour(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, BookingError> {
    let tour = TourService::get_tour(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tour))
}

/// GET /tours/{id}/gallery
pub async fn get_gallery(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, BookingError> {
    let gallery = TourService::get_gallery(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(gallery))
}

/// PUT /tours/{id}
/// Full update of the tour and all child rows (admin)
pub async fn update_tour(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateTourRequest>,
) -> Result<impl Responder, BookingError> {
    verify_admin_token(&http_req, &config)?;

    TourService::update_tour(pool.get_ref(), path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Tour updated successfully" })))
}

/// PUT /tours/{id}/info
/// Scalar-column update without touching images or child rows (admin)
pub async fn update_info(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateTourInfoRequest>,
) -> Result<impl Responder, BookingError> {
    verify_admin_token(&http_req, &config)?;

    TourRepository::update_info(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Tour info updated" })))
}

/// PUT /tours/{id}/dates (admin)
pub async fn update_dates(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateDatesRequest>,
) -> Result<impl Responder, BookingError> {
    verify_admin_token(&http_req, &config)?;

    TourRepository::replace_dates(pool.get_ref(), path.into_inner(), &req.available_dates)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Dates updated" })))
}

/// PUT /tours/{id}/program (admin)
pub async fn update_program(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateProgramRequest>,
) -> Result<impl Responder, BookingError> {
    verify_admin_token(&http_req, &config)?;

    if req.program.is_empty() {
        return Err(BookingError::ValidationError(
            "Program must not be empty".to_string(),
        ));
    }

    TourRepository::replace_program(pool.get_ref(), path.into_inner(), &req.program).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Program updated" })))
}

/// PUT /tours/{id}/highlights (admin)
pub async fn update_highlights(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateHighlightsRequest>,
) -> Result<impl Responder, BookingError> {
    verify_admin_token(&http_req, &config)?;

    if req.highlights.is_empty() {
        return Err(BookingError::ValidationError(
            "Highlights must not be empty".to_string(),
        ));
    }

    TourRepository::replace_highlights(pool.get_ref(), path.into_inner(), &req.highlights)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Highlights updated" })))
}

/// PUT /tours/{id}/destinations (admin)
pub async fn update_destinations(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateDestinationsRequest>,
) -> Result<impl Responder, BookingError> {
    verify_admin_token(&http_req, &config)?;

    if req.destinations.is_empty() {
        return Err(BookingError::ValidationError(
            "Destinations must not be empty".to_string(),
        ));
    }

    TourRepository::update_destinations(pool.get_ref(), path.into_inner(), &req.destinations)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Destinations updated" })))
}

/// PUT /tours/{id}/images (admin)
pub async fn update_images(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateImagesRequest>,
) -> Result<impl Responder, BookingError> {
    verify_admin_token(&http_req, &config)?;

    let body = req.into_inner();
    TourService::update_images(pool.get_ref(), path.into_inner(), body.main_image, body.gallery)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Images updated" })))
}

/// DELETE /tours/{id} (admin)
/// Child rows go with the tour via ON DELETE CASCADE
pub async fn delete_tour(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, BookingError> {
    verify_admin_token(&http_req, &config)?;

    let id = path.into_inner();
    TourRepository::delete_tour(pool.get_ref(), id).await?;

    log::info!("Deleted tour {}", id);

    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for tour routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tours")
            .route("", web::post().to(create_tour))
            .route("", web::get().to(list_tours))
            .route("/{id}", web::get().to(get_tour))
            .route("/{id}", web::put().to(update_tour))
            .route("/{id}", web::delete().to(delete_tour))
            .route("/{id}/gallery", web::get().to(get_gallery))
            .route("/{id}/info", web::put().to(update_info))
            .route("/{id}/dates", web::put().to(update_dates))
            .route("/{id}/program", web::put().to(update_program))
            .route("/{id}/highlights", web::put().to(update_highlights))
            .route("/{id}/destinations", web::put().to(update_destinations))
            .route("/{id}/images", web::put().to(update_images)),
    );
}
