// src/services/booking_service.rs
// DOCUMENTATION: Business logic for the reservation and payment workflow
// PURPOSE: Orchestrates the transactional booking insert, the PayPal capture
// settlement and the manual bank-transfer receipt path

use crate::db::{PaymentSettingsRepository, ReservationRepository, TourRepository};
use crate::errors::BookingError;
use crate::models::*;
use crate::services::paypal_client::{
    extract_completed_capture, Capture, CaptureOrderResponse, PayPalClient,
};
use crate::services::media;
use chrono::Days;
use sqlx::PgPool;
use uuid::Uuid;

pub struct BookingService;

impl BookingService {
    /// Book a daily tour
    /// DOCUMENTATION: Verifies the tour is a daily one, derives the service
    /// window end when the client did not send it, then inserts the departure
    /// row, the reservation and the travelers in one transaction
    pub async fn create_daily_reservation(
        pool: &PgPool,
        req: CreateDailyReservationRequest,
    ) -> Result<Uuid, BookingError> {
        if req.travelers.is_empty() {
            return Err(BookingError::ValidationError(
                "At least one traveler is required".to_string(),
            ));
        }

        let tour = TourRepository::get_by_id(pool, req.tour_id).await?;
        if !tour.daily {
            return Err(BookingError::InvalidInput(format!(
                "Tour {} is not a daily tour",
                req.tour_id
            )));
        }

        let end_date = match req.end_date {
            Some(end) => end,
            None => req
                .selected_date
                .checked_add_days(Days::new(tour.days as u64))
                .ok_or_else(|| {
                    BookingError::InvalidInput("Selected date out of range".to_string())
                })?,
        };

        ReservationRepository::create_daily(pool, &req, end_date).await
    }

    /// Settle a PayPal capture
    /// DOCUMENTATION: Captures the approved order; a capture without a
    /// COMPLETED payment transitions the reservation to rejected, a completed
    /// one records amount/currency and flips paid
    pub async fn capture_paypal_payment(
        pool: &PgPool,
        paypal: &PayPalClient,
        order_id: &str,
        reservation_id: Uuid,
    ) -> Result<CaptureResultResponse, BookingError> {
        // Fail fast on unknown or already-settled reservations before talking
        // to PayPal
        let reservation = ReservationRepository::get_row(pool, reservation_id).await?;
        if reservation.paid {
            return Err(BookingError::AlreadyExists(format!(
                "Reservation {} is already paid",
                reservation_id
            )));
        }

        let response = match paypal.capture_order(order_id).await {
            Ok(response) => response,
            Err(BookingError::PaymentFailed(reason)) => {
                ReservationRepository::mark_rejected(pool, reservation_id).await?;
                return Err(BookingError::PaymentFailed(reason));
            }
            Err(e) => return Err(e),
        };

        let capture = match Self::completed_capture(order_id, &response) {
            Ok(capture) => capture,
            Err(e) => {
                ReservationRepository::mark_rejected(pool, reservation_id).await?;
                return Err(e);
            }
        };

        ReservationRepository::mark_paid_paypal(
            pool,
            reservation_id,
            &capture.amount.value,
            &capture.amount.currency_code,
        )
        .await?;

        Ok(CaptureResultResponse {
            message: "Payment captured and saved successfully".to_string(),
            transaction_id: capture.id,
            amount: capture.amount.value,
            currency: capture.amount.currency_code,
        })
    }

    /// Store a bank-transfer receipt
    /// DOCUMENTATION: The receipt is reviewed out-of-band; the reservation is
    /// marked paid via 'bank' with the advance amount declared by the client.
    /// A declared amount that does not match the configured advance is logged
    /// for the reviewer, not rejected.
    pub async fn upload_receipt(
        pool: &PgPool,
        req: ReceiptUploadRequest,
    ) -> Result<(), BookingError> {
        if req.amount <= 0.0 {
            return Err(BookingError::InvalidInput(
                "Receipt amount must be positive".to_string(),
            ));
        }

        let summary = ReservationRepository::get_by_id(pool, req.reservation_id).await?;
        if let Ok(percent) = PaymentSettingsRepository::get_percent(pool).await {
            let total = summary.price * summary.traveler_count as f64;
            let expected = Self::advance_amount(total, percent);
            if (req.amount - expected).abs() > 0.01 {
                log::warn!(
                    "Receipt for reservation {} declares {} but the expected advance is {}",
                    req.reservation_id,
                    req.amount,
                    expected
                );
            }
        }

        let receipt = media::decode_image(&req.image)?;
        ReservationRepository::attach_receipt(pool, req.reservation_id, &receipt, req.amount)
            .await
    }

    /// Update the advance percentage
    pub async fn set_percent(pool: &PgPool, value: i32) -> Result<(), BookingError> {
        if !(0..=100).contains(&value) {
            return Err(BookingError::ValidationError(
                "Value must be a number between 0 and 100".to_string(),
            ));
        }
        PaymentSettingsRepository::set_percent(pool, value).await
    }

    /// Up-front amount for a booking total, rounded to cents
    pub fn advance_amount(total: f64, percent: i32) -> f64 {
        (total * percent as f64).round() / 100.0
    }

    /// Completed capture of a settlement response
    /// DOCUMENTATION: Anything other than a COMPLETED first capture means no
    /// money moved; callers reject the reservation on this error
    fn completed_capture(
        order_id: &str,
        response: &CaptureOrderResponse,
    ) -> Result<Capture, BookingError> {
        extract_completed_capture(response).cloned().ok_or_else(|| {
            BookingError::PaymentFailed(format!(
                "Order {} has no completed capture",
                order_id
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use httpmock::prelude::*;

    #[test]
    fn test_advance_amount() {
        assert_eq!(BookingService::advance_amount(1000.0, 20), 200.0);
        assert_eq!(BookingService::advance_amount(333.33, 30), 100.0);
        assert_eq!(BookingService::advance_amount(149.99, 50), 75.0);
    }

    #[test]
    fn test_advance_amount_bounds() {
        assert_eq!(BookingService::advance_amount(500.0, 0), 0.0);
        assert_eq!(BookingService::advance_amount(500.0, 100), 500.0);
    }

    #[tokio::test]
    async fn test_booking_requires_a_traveler() {
        // Lazy pool: the traveler check fires before any query runs
        let pool = PgPool::connect_lazy("postgresql://localhost/unreachable").unwrap();

        let req = CreateDailyReservationRequest {
            tour_id: Uuid::new_v4(),
            selected_date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
            end_date: None,
            price: 85.0,
            travelers: vec![],
            user_id: None,
        };

        let err = BookingService::create_daily_reservation(&pool, req)
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_declined_capture_does_not_settle() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/v1/oauth2/token");
            then.status(200).json_body(serde_json::json!({
                "access_token": "A.token",
                "expires_in": 32400
            }));
        });

        server.mock(|when, then| {
            when.method(POST).path("/v2/checkout/orders/ORDER-9/capture");
            then.status(201).json_body(serde_json::json!({
                "id": "ORDER-9",
                "status": "COMPLETED",
                "purchase_units": [{
                    "reference_id": "res-9",
                    "payments": {
                        "captures": [{
                            "id": "CAP-9",
                            "status": "DECLINED",
                            "amount": { "currency_code": "USD", "value": "120.00" }
                        }]
                    }
                }]
            }));
        });

        let client = PayPalClient::new(
            "client-id".to_string(),
            "client-secret".to_string(),
            server.base_url(),
        );

        // The 2xx capture answer parses fine, but no money moved
        let response = client.capture_order("ORDER-9").await.unwrap();
        let err = BookingService::completed_capture("ORDER-9", &response).unwrap_err();

        assert!(matches!(err, BookingError::PaymentFailed(_)));
    }

    #[test]
    fn test_completed_capture_passes_through() {
        let response = CaptureOrderResponse {
            id: "ORDER-3".to_string(),
            status: "COMPLETED".to_string(),
            purchase_units: vec![crate::services::paypal_client::CapturePurchaseUnit {
                reference_id: Some("res-3".to_string()),
                payments: Some(crate::services::paypal_client::CapturePayments {
                    captures: vec![Capture {
                        id: "CAP-3".to_string(),
                        status: "COMPLETED".to_string(),
                        amount: crate::services::paypal_client::CaptureAmount {
                            currency_code: "USD".to_string(),
                            value: "240.00".to_string(),
                        },
                    }],
                }),
            }],
        };

        let capture = BookingService::completed_capture("ORDER-3", &response).unwrap();
        assert_eq!(capture.id, "CAP-3");
        assert_eq!(capture.amount.value, "240.00");
    }
}
