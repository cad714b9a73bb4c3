// src/db/reservation_repository.rs
// DOCUMENTATION: Database access layer for reservations and travelers
// PURPOSE: Transactional booking insert and payment state transitions

use crate::errors::BookingError;
use crate::models::{CreateDailyReservationRequest, Reservation, ReservationSummary};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

/// Capacity sentinel for the synthetic departure row a daily booking creates.
/// Daily tours have no fixed capacity; the row exists to anchor the service window.
pub const DAILY_SLOT_CAPACITY: i32 = 65_535;

const SELECT_SUMMARY: &str = r#"
    SELECT
        res.id, res.tour_id,
        t.title AS tour_title, t.code AS tour_code, t.daily,
        d.start_date, d.end_date, d.price,
        (SELECT COUNT(*) FROM travelers v WHERE v.reservation_id = res.id) AS traveler_count,
        res.status, res.paid, res.payment_method, res.paid_amount, res.currency,
        res.created_at
    FROM reservations res
    JOIN tours t ON t.id = res.tour_id
    JOIN tour_dates d ON d.id = res.tour_date_id
"#;

/// ReservationRepository: All database operations for bookings
pub struct ReservationRepository;

impl ReservationRepository {
    /// Create a daily-tour reservation
    /// DOCUMENTATION: Single transaction inserting the service-window departure
    /// row, the reservation (status pending, unpaid) and one row per traveler.
    /// Rolls back on any failure.
    /// Used by POST /reservations/daily
    pub async fn create_daily(
        pool: &PgPool,
        req: &CreateDailyReservationRequest,
        end_date: NaiveDate,
    ) -> Result<Uuid, BookingError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open transaction: {}", e);
            BookingError::DatabaseError(e.to_string())
        })?;

        let date_row: (Uuid,) = sqlx::query_as(
            "INSERT INTO tour_dates (tour_id, start_date, end_date, spots, price) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(req.tour_id)
        .bind(req.selected_date)
        .bind(end_date)
        .bind(DAILY_SLOT_CAPACITY)
        .bind(req.price)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Failed to insert service window: {}", e);
            BookingError::DatabaseError(e.to_string())
        })?;

        let reservation_row: (Uuid,) = sqlx::query_as(
            "INSERT INTO reservations (tour_id, tour_date_id, user_id, status, paid, created_at) \
             VALUES ($1, $2, $3, 'pending', FALSE, NOW()) RETURNING id",
        )
        .bind(req.tour_id)
        .bind(date_row.0)
        .bind(req.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Failed to insert reservation: {}", e);
            BookingError::DatabaseError(e.to_string())
        })?;

        let reservation_id = reservation_row.0;

        for traveler in &req.travelers {
            sqlx::query(
                r#"
                INSERT INTO travelers (
                    reservation_id, prefix, last_name, first_name, birth_date,
                    phone, email, nationality, passport, passport_expiry,
                    country, city, address, province, postal_code
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
                "#,
            )
            .bind(reservation_id)
            .bind(&traveler.prefix)
            .bind(&traveler.last_name)
            .bind(&traveler.first_name)
            .bind(traveler.birth_date)
            .bind(&traveler.phone)
            .bind(&traveler.email)
            .bind(&traveler.nationality)
            .bind(&traveler.passport)
            .bind(traveler.passport_expiry)
            .bind(&traveler.country)
            .bind(&traveler.city)
            .bind(&traveler.address)
            .bind(&traveler.province)
            .bind(&traveler.postal_code)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                log::error!("Failed to insert traveler: {}", e);
                BookingError::DatabaseError(e.to_string())
            })?;
        }

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit reservation: {}", e);
            BookingError::DatabaseError(e.to_string())
        })?;

        log::info!(
            "Created reservation {} ({} travelers)",
            reservation_id,
            req.travelers.len()
        );
        Ok(reservation_id)
    }

    /// Reservations of one account
    /// DOCUMENTATION: Used by GET /reservations/me
    pub async fn get_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<ReservationSummary>, BookingError> {
        let sql = format!("{} WHERE res.user_id = $1 ORDER BY res.created_at DESC", SELECT_SUMMARY);

        sqlx::query_as::<_, ReservationSummary>(&sql)
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch reservations for user {}: {}", user_id, e);
                BookingError::DatabaseError(e.to_string())
            })
    }

    /// Single reservation lookup
    /// DOCUMENTATION: Used by GET /reservations/{id}; anonymous bookings keep
    /// the id client-side and fetch through this endpoint
    pub async fn get_by_id(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<ReservationSummary, BookingError> {
        let sql = format!("{} WHERE res.id = $1", SELECT_SUMMARY);

        sqlx::query_as::<_, ReservationSummary>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch reservation {}: {}", id, e);
                BookingError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }

    /// All reservations, newest first
    /// DOCUMENTATION: Used by the back-office listing
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ReservationSummary>, BookingError> {
        let sql = format!("{} ORDER BY res.created_at DESC", SELECT_SUMMARY);

        sqlx::query_as::<_, ReservationSummary>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list reservations: {}", e);
                BookingError::DatabaseError(e.to_string())
            })
    }

    /// Raw reservation row
    pub async fn get_row(pool: &PgPool, id: Uuid) -> Result<Reservation, BookingError> {
        sqlx::query_as::<_, Reservation>(
            "SELECT id, tour_id, tour_date_id, user_id, status, paid, \
             payment_method, paid_amount, currency, created_at \
             FROM reservations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch reservation row {}: {}", id, e);
            BookingError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }

    /// Transition the review status (approve/reject after out-of-band check)
    pub async fn set_status(
        pool: &PgPool,
        id: Uuid,
        status: &str,
    ) -> Result<(), BookingError> {
        let rows = sqlx::query("UPDATE reservations SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Status update failed for reservation {}: {}", id, e);
                BookingError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(BookingError::NotFound(id.to_string()));
        }

        log::info!("Reservation {} status -> {}", id, status);
        Ok(())
    }

    /// Record a completed PayPal capture
    pub async fn mark_paid_paypal(
        pool: &PgPool,
        id: Uuid,
        paid_amount: &str,
        currency: &str,
    ) -> Result<(), BookingError> {
        let rows = sqlx::query(
            "UPDATE reservations SET paid = TRUE, payment_method = 'paypal', \
             paid_amount = $1::float8, currency = $2 WHERE id = $3",
        )
        .bind(paid_amount)
        .bind(currency)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to record capture for reservation {}: {}", id, e);
            BookingError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if rows == 0 {
            return Err(BookingError::NotFound(id.to_string()));
        }

        log::info!("Reservation {} paid via PayPal ({} {})", id, paid_amount, currency);
        Ok(())
    }

    /// Mark a reservation rejected after a failed capture
    /// DOCUMENTATION: Plain column update, safe to repeat
    pub async fn mark_rejected(pool: &PgPool, id: Uuid) -> Result<(), BookingError> {
        sqlx::query("UPDATE reservations SET status = 'rejected' WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to reject reservation {}: {}", id, e);
                BookingError::DatabaseError(e.to_string())
            })?;

        log::warn!("Reservation {} rejected (capture not completed)", id);
        Ok(())
    }

    /// Store a bank-transfer receipt and mark the advance paid
    /// DOCUMENTATION: Used by POST /payments/receipts
    pub async fn attach_receipt(
        pool: &PgPool,
        id: Uuid,
        receipt: &[u8],
        amount: f64,
    ) -> Result<(), BookingError> {
        let rows = sqlx::query(
            "UPDATE reservations SET receipt_image = $1, paid = TRUE, \
             payment_method = 'bank', paid_amount = $2 WHERE id = $3",
        )
        .bind(receipt)
        .bind(amount)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Receipt upload failed for reservation {}: {}", id, e);
            BookingError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if rows == 0 {
            return Err(BookingError::NotFound(id.to_string()));
        }

        log::info!("Receipt stored for reservation {} ({} paid)", id, amount);
        Ok(())
    }
}
