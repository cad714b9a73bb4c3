// src/handlers/payments.rs
// DOCUMENTATION: HTTP handlers for the payment flow
// PURPOSE: PayPal order/capture endpoints, advance percentage and receipts

use super::verify_admin_token;
use crate::config::Config;
use crate::db::PaymentSettingsRepository;
use crate::errors::BookingError;
use crate::models::{
    CaptureOrderRequest, CreateOrderRequest, PercentResponse, ReceiptUploadRequest,
    UpdatePercentRequest,
};
use crate::services::{BookingService, PayPalClient, TokenCache};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;

/// Build a PayPal client from the configured credentials
/// DOCUMENTATION: The token cache is shared across requests so workers reuse
/// one OAuth token until it expires
fn paypal_client(config: &Config, cache: &TokenCache) -> Result<PayPalClient, BookingError> {
    if config.paypal_client_id.is_empty() || config.paypal_client_secret.is_empty() {
        return Err(BookingError::InvalidInput(
            "PayPal credentials not configured".to_string(),
        ));
    }

    Ok(PayPalClient::new_with_cache(
        config.paypal_client_id.clone(),
        config.paypal_client_secret.clone(),
        config.paypal_base_url.clone(),
        cache.clone(),
    ))
}

/// POST /payments/paypal/orders
/// Create a PayPal order for a reservation
pub async fn create_order(
    config: web::Data<Config>,
    cache: web::Data<TokenCache>,
    req: web::Json<CreateOrderRequest>,
) -> Result<impl Responder, BookingError> {
    if req.total_price <= 0.0 {
        return Err(BookingError::InvalidInput(
            "Order amount must be positive".to_string(),
        ));
    }

    let client = paypal_client(&config, &cache)?;
    let order = client.create_order(req.reservation_id, req.total_price).await?;

    log::info!(
        "Created PayPal order {} for reservation {}",
        order.id,
        req.reservation_id
    );

    Ok(HttpResponse::Created().json(order))
}

/// POST /payments/paypal/orders/{order_id}/capture
/// Capture an approved order and settle the reservation
pub async fn capture_order(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    cache: web::Data<TokenCache>,
    path: web::Path<String>,
    req: web::Json<CaptureOrderRequest>,
) -> Result<impl Responder, BookingError> {
    let client = paypal_client(&config, &cache)?;
    let order_id = path.into_inner();

    let result = BookingService::capture_paypal_payment(
        pool.get_ref(),
        &client,
        &order_id,
        req.reservation_id,
    )
    .await?;

    log::info!(
        "Captured PayPal order {} for reservation {}",
        order_id,
        req.reservation_id
    );

    Ok(HttpResponse::Ok().json(result))
}

/// GET /payments/percent
/// Current advance percentage
pub async fn get_percent(pool: web::Data<PgPool>) -> Result<impl Responder, BookingError> {
    let value = PaymentSettingsRepository::get_percent(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(PercentResponse {
        message: "Current advance percentage".to_string(),
        value,
    }))
}

/// PUT /payments/percent (admin)
pub async fn update_percent(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    req: web::Json<UpdatePercentRequest>,
) -> Result<impl Responder, BookingError> {
    verify_admin_token(&http_req, &config)?;

    BookingService::set_percent(pool.get_ref(), req.value).await?;

    log::info!("Advance percentage set to {}", req.value);

    Ok(HttpResponse::Ok().json(PercentResponse {
        message: "Advance percentage updated".to_string(),
        value: req.value,
    }))
}

/// POST /payments/receipts
/// Bank-transfer receipt upload
pub async fn upload_receipt(
    pool: web::Data<PgPool>,
    req: web::Json<ReceiptUploadRequest>,
) -> Result<impl Responder, BookingError> {
    let reservation_id = req.reservation_id;
    BookingService::upload_receipt(pool.get_ref(), req.into_inner()).await?;

    log::info!("Stored receipt for reservation {}", reservation_id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Receipt uploaded; the reservation will be reviewed shortly"
    })))
}

/// Configuration for payment routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payments")
            .route("/paypal/orders", web::post().to(create_order))
            .route("/paypal/orders/{order_id}/capture", web::post().to(capture_order))
            .route("/percent", web::get().to(get_percent))
            .route("/percent", web::put().to(update_percent))
            .route("/receipts", web::post().to(upload_receipt)),
    );
}
