// src/models/reservation.rs
// DOCUMENTATION: Core data structures for reservations and travelers
// PURPOSE: Defines DTOs for the booking flow and account reservation listing

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Traveler details collected in step 2 of the booking flow
/// DOCUMENTATION: One row in the travelers table per entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TravelerInput {
    /// Mr. / Mrs. / Ms. / Dr.
    #[validate(length(min = 1, max = 10))]
    pub prefix: String,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    pub birth_date: NaiveDate,

    pub phone: Option<String>,

    #[validate(email)]
    pub email: String,

    pub nationality: Option<String>,

    pub passport: Option<String>,

    pub passport_expiry: Option<NaiveDate>,

    #[validate(length(min = 1, max = 100))]
    pub country: String,

    #[validate(length(min = 1, max = 100))]
    pub city: String,

    pub address: Option<String>,

    pub province: Option<String>,

    pub postal_code: Option<String>,
}

/// Request DTO for booking a daily tour
/// DOCUMENTATION: POST /reservations/daily
/// end_date is optional; the server derives it from the tour duration when absent
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDailyReservationRequest {
    pub tour_id: Uuid,

    pub selected_date: NaiveDate,

    pub end_date: Option<NaiveDate>,

    /// Per-person price quoted at booking time
    pub price: f64,

    #[validate]
    pub travelers: Vec<TravelerInput>,

    /// None for anonymous bookings (the id is kept client-side)
    pub user_id: Option<Uuid>,
}

/// Reservation row as stored in the database
#[derive(Debug, Clone, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    pub tour_id: Uuid,
    pub tour_date_id: Uuid,
    pub user_id: Option<Uuid>,
    pub status: String,
    pub paid: bool,
    pub payment_method: Option<String>,
    pub paid_amount: Option<f64>,
    pub currency: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Reservation as listed on the account page
/// DOCUMENTATION: Joined view over reservations, tours, tour_dates and travelers
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReservationSummary {
    pub id: Uuid,
    pub tour_id: Uuid,
    pub tour_title: String,
    pub tour_code: String,
    pub daily: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Per-person price of the booked departure
    pub price: f64,
    pub traveler_count: i64,
    pub status: String,
    pub paid: bool,
    pub payment_method: Option<String>,
    pub paid_amount: Option<f64>,
    pub currency: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Response for a successful booking
#[derive(Debug, Serialize)]
pub struct ReservationCreatedResponse {
    pub success: bool,
    pub reservation_id: Uuid,
}

/// Admin request to settle a reservation after reviewing the receipt
#[derive(Debug, Deserialize)]
pub struct UpdateReservationStatusRequest {
    /// approved | rejected | pending
    pub status: String,
}

impl UpdateReservationStatusRequest {
    /// Statuses a reservation may transition to
    pub fn is_valid_status(&self) -> bool {
        matches!(self.status.as_str(), "approved" | "rejected" | "pending")
    }
}

/// Query parameters for the account reservation listing
#[derive(Debug, Deserialize)]
pub struct MyReservationsQuery {
    pub user_id: Uuid,
}
