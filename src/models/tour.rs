// src/models/tour.rs
// DOCUMENTATION: Core data structures for tours
// PURPOSE: Defines all serialization/deserialization models for the catalog API

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Per-day program entry as submitted by the back office
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramDayInput {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub included: Vec<String>,
    #[serde(default)]
    pub destinations: Vec<String>,
}

/// Departure date for non-daily tours
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourDateInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub spots: i32,
}

/// Request DTO for creating a new tour
/// DOCUMENTATION: Data transfer object for POST /tours endpoint
/// Images travel as base64 strings (raw or data URLs)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTourRequest {
    /// Tour title (required)
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    /// Description (required)
    #[validate(length(min = 1))]
    pub description: String,

    /// Tour type (required)
    #[serde(rename = "type")]
    pub type_: String,

    /// Duration in days
    #[validate(range(min = 1))]
    pub days: i32,

    /// Minimum travelers per departure
    #[validate(range(min = 1))]
    pub min_spots: i32,

    /// Maximum travelers per booking
    #[serde(default)]
    pub max_spots: i32,

    /// Recurring tour flag
    #[serde(default)]
    pub daily: bool,

    /// Service window start (daily tours)
    pub daily_start_date: Option<NaiveDate>,

    /// Fixed price (daily tours)
    pub daily_price: Option<f64>,

    /// Main image, base64 encoded
    pub main_image: String,

    /// Gallery images, base64 encoded
    pub gallery: Vec<String>,

    /// Destination names; the unique code is derived from these
    pub destinations: Vec<String>,

    /// Day-by-day program
    pub program: Vec<ProgramDayInput>,

    /// Highlight lines
    pub highlights: Vec<String>,

    /// Departure dates (non-daily tours)
    pub available_dates: Option<Vec<TourDateInput>>,
}

/// Request DTO for the full tour update
/// DOCUMENTATION: PUT /tours/{id} replaces the tour row and all child rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTourRequest {
    pub title: String,
    pub description: String,
    pub code: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub days: i32,
    /// New main image; None keeps the image column untouched by sending NULL
    pub image: Option<String>,
    pub destinations: Vec<String>,
    pub min_spots: i32,
    #[serde(default)]
    pub daily: bool,
    pub daily_start_date: Option<NaiveDate>,
    pub daily_price: Option<f64>,
    #[serde(default)]
    pub gallery: Vec<String>,
    pub program: Vec<ProgramDayInput>,
    pub highlights: Vec<String>,
    #[serde(default)]
    pub available_dates: Vec<TourDateInput>,
}

/// Request DTO for the scalar-column partial update
/// DOCUMENTATION: PUT /tours/{id}/info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTourInfoRequest {
    pub code: String,
    pub title: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub days: i32,
    pub min_spots: i32,
    pub description: String,
    #[serde(default)]
    pub daily: bool,
    pub daily_start_date: Option<NaiveDate>,
    pub daily_price: Option<f64>,
}

/// Query parameters for the catalog listing
/// DOCUMENTATION: DTO for parsing query string in GET /tours
/// All parameters optional for flexible filtering
#[derive(Debug, Deserialize)]
pub struct TourListQuery {
    /// Page number (1-based)
    pub page: Option<i64>,

    /// Results per page
    pub limit: Option<i64>,

    /// Search term matched against title and destinations
    pub search_term: Option<String>,

    /// Sort key: price-asc, price-desc, days-asc, days-desc, rating, date
    pub sort_by: Option<String>,

    /// Earliest acceptable departure
    pub date_from: Option<NaiveDate>,

    /// Latest acceptable return
    pub date_to: Option<NaiveDate>,

    /// Duration window
    pub days_min: Option<i32>,
    pub days_max: Option<i32>,

    /// Budget window applied to the effective price
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,

    /// Filter by tour type
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

/// Catalog list item
/// DOCUMENTATION: One card in the destinations grid
#[derive(Debug, Clone, Serialize)]
pub struct TourSummary {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub days: i32,
    /// Effective price: fixed price for daily tours, cheapest departure otherwise
    pub price: f64,
    pub daily: bool,
    /// Earliest departure (or service window start)
    pub date: Option<NaiveDate>,
    /// Latest departure (non-daily only)
    pub date_max: Option<NaiveDate>,
    /// Main image as data URL, placeholder when missing
    pub image: String,
    pub destinations: Vec<String>,
    pub rating: f64,
    pub reviews: i64,
}

/// Paginated catalog response
#[derive(Debug, Serialize)]
pub struct TourListResponse {
    pub tours: Vec<TourSummary>,
    pub total: i64,
}

/// Program day in API responses
#[derive(Debug, Clone, Serialize)]
pub struct ProgramDayResponse {
    pub day: i32,
    pub title: String,
    pub description: String,
    pub destinations: Vec<String>,
    pub included: Vec<String>,
}

/// Departure date in API responses
#[derive(Debug, Clone, Serialize)]
pub struct TourDateResponse {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub spots: i32,
}

/// Full client-facing tour detail
/// DOCUMENTATION: Response for GET /tours/{id}
#[derive(Debug, Serialize)]
pub struct TourDetailResponse {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub days: i32,
    pub daily: bool,
    pub price: f64,
    pub date_start: Option<NaiveDate>,
    pub min_spots: i32,
    pub max_spots: i32,
    pub image: String,
    pub destinations: Vec<String>,
    pub rating: f64,
    pub reviews: i64,
    pub description: String,
    pub gallery: Vec<String>,
    pub program: Vec<ProgramDayResponse>,
    pub highlights: Vec<String>,
    pub available_dates: Vec<TourDateResponse>,
}

/// Gallery-only response
/// DOCUMENTATION: Response for GET /tours/{id}/gallery
#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub tour_id: Uuid,
    pub title: String,
    pub gallery: Vec<String>,
}
