// src/models/payment.rs
// DOCUMENTATION: DTOs for the payment endpoints
// PURPOSE: PayPal order flow, advance percentage and receipt upload payloads

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request DTO for POST /payments/paypal/orders
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub reservation_id: Uuid,
    /// Amount charged up front (total or advance), in USD
    pub total_price: f64,
}

/// Request DTO for POST /payments/paypal/orders/{order_id}/capture
#[derive(Debug, Deserialize)]
pub struct CaptureOrderRequest {
    pub reservation_id: Uuid,
}

/// Response after a successful capture
#[derive(Debug, Serialize)]
pub struct CaptureResultResponse {
    pub message: String,
    pub transaction_id: String,
    pub amount: String,
    pub currency: String,
}

/// Current advance percentage
/// DOCUMENTATION: Fraction of the total price due at booking time;
/// the remainder is paid in person
#[derive(Debug, Serialize)]
pub struct PercentResponse {
    pub message: String,
    pub value: i32,
}

/// Request DTO for PUT /payments/percent
#[derive(Debug, Deserialize)]
pub struct UpdatePercentRequest {
    pub value: i32,
}

/// Request DTO for POST /payments/receipts
/// DOCUMENTATION: Manual bank-transfer proof of payment, reviewed out-of-band
#[derive(Debug, Deserialize)]
pub struct ReceiptUploadRequest {
    pub reservation_id: Uuid,
    /// Receipt image, base64 encoded (raw or data URL)
    pub image: String,
    /// Advance amount actually transferred
    pub amount: f64,
}
