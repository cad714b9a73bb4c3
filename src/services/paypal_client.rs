// src/services/paypal_client.rs
// DOCUMENTATION: PayPal REST API client
// PURPOSE: OAuth2 client-credentials token, order creation and order capture

use crate::errors::BookingError;
use crate::services::TokenCache;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// PayPal REST API client
/// DOCUMENTATION: Handles authentication and the checkout order protocol.
/// The access token is cached until shortly before its reported expiry.
pub struct PayPalClient {
    /// HTTP client for making requests
    client: Client,
    /// REST API client id
    client_id: String,
    /// REST API client secret
    client_secret: String,
    /// Base URL (sandbox or live)
    base_url: String,
    /// Cached OAuth access token
    token_cache: TokenCache,
}

/// Response from the OAuth2 token endpoint
#[derive(Debug, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

/// Created checkout order
/// DOCUMENTATION: Returned verbatim to the frontend PayPal button
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    /// PayPal order id
    pub id: String,
    /// CREATED, APPROVED, COMPLETED, ...
    pub status: String,
}

/// Amount as PayPal reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureAmount {
    pub currency_code: String,
    pub value: String,
}

/// Single capture inside a purchase unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capture {
    pub id: String,
    pub status: String,
    pub amount: CaptureAmount,
}

/// Payments block of a purchase unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturePayments {
    #[serde(default)]
    pub captures: Vec<Capture>,
}

/// Purchase unit in a capture response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturePurchaseUnit {
    pub reference_id: Option<String>,
    pub payments: Option<CapturePayments>,
}

/// Response from POST /v2/checkout/orders/{id}/capture
#[derive(Debug, Serialize, Deserialize)]
pub struct CaptureOrderResponse {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub purchase_units: Vec<CapturePurchaseUnit>,
}

impl PayPalClient {
    /// Create new PayPal client
    /// DOCUMENTATION: Initializes client with REST credentials and base URL
    pub fn new(client_id: String, client_secret: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            client_id,
            client_secret,
            base_url,
            token_cache: TokenCache::new(),
        }
    }

    /// Create a client sharing an existing token cache
    pub fn new_with_cache(
        client_id: String,
        client_secret: String,
        base_url: String,
        token_cache: TokenCache,
    ) -> Self {
        Self {
            client: Client::new(),
            client_id,
            client_secret,
            base_url,
            token_cache,
        }
    }

    /// Obtain an OAuth2 access token via the client-credentials grant
    /// DOCUMENTATION: Serves the cached token when still valid; otherwise
    /// POSTs /v1/oauth2/token with HTTP basic auth and caches the result
    pub async fn get_access_token(&self) -> Result<String, BookingError> {
        if let Some(token) = self.token_cache.get().await {
            return Ok(token);
        }

        let url = format!("{}/v1/oauth2/token", self.base_url);

        log::debug!("Requesting PayPal access token");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(|e| {
                log::error!("PayPal token request failed: {}", e);
                BookingError::PaymentProviderError(format!("Token request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("PayPal token endpoint error {}: {}", status, body);
            return Err(BookingError::PaymentProviderError(format!(
                "Token endpoint error {}",
                status
            )));
        }

        let token: AccessTokenResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse PayPal token response: {}", e);
            BookingError::PaymentProviderError(format!("Token parse error: {}", e))
        })?;

        self.token_cache
            .store(token.access_token.clone(), token.expires_in)
            .await;

        Ok(token.access_token)
    }

    /// Create a checkout order for a reservation
    /// DOCUMENTATION: POST /v2/checkout/orders with intent CAPTURE;
    /// the reservation id travels as reference_id
    pub async fn create_order(
        &self,
        reservation_id: Uuid,
        total_price: f64,
    ) -> Result<OrderResponse, BookingError> {
        let token = self.get_access_token().await?;
        let url = format!("{}/v2/checkout/orders", self.base_url);

        let body = Self::order_body(reservation_id, total_price);

        log::debug!(
            "Creating PayPal order for reservation {} ({} USD)",
            reservation_id,
            Self::format_amount(total_price)
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                log::error!("PayPal order request failed: {}", e);
                BookingError::PaymentProviderError(format!("Order request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("PayPal order creation error {}: {}", status, body);
            if status == reqwest::StatusCode::UNAUTHORIZED {
                // Cached token was revoked; force a fresh grant next time
                self.token_cache.clear().await;
            }
            return Err(BookingError::PaymentProviderError(format!(
                "Order creation error {}",
                status
            )));
        }

        let order: OrderResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse PayPal order response: {}", e);
            BookingError::PaymentProviderError(format!("Order parse error: {}", e))
        })?;

        log::info!(
            "PayPal order {} created for reservation {} ({})",
            order.id,
            reservation_id,
            order.status
        );
        Ok(order)
    }

    /// Capture an approved order
    /// DOCUMENTATION: POST /v2/checkout/orders/{id}/capture.
    /// A non-2xx answer maps to PaymentFailed so callers can reject the booking.
    pub async fn capture_order(
        &self,
        order_id: &str,
    ) -> Result<CaptureOrderResponse, BookingError> {
        let token = self.get_access_token().await?;
        let url = format!("{}/v2/checkout/orders/{}/capture", self.base_url, order_id);

        log::debug!("Capturing PayPal order {}", order_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| {
                log::error!("PayPal capture request failed: {}", e);
                BookingError::PaymentProviderError(format!("Capture request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("PayPal capture error {} for order {}: {}", status, order_id, body);
            if status == reqwest::StatusCode::UNAUTHORIZED {
                self.token_cache.clear().await;
                return Err(BookingError::PaymentProviderError(
                    "Capture rejected: authentication expired".to_string(),
                ));
            }
            return Err(BookingError::PaymentFailed(format!(
                "Capture declined ({})",
                status
            )));
        }

        let capture: CaptureOrderResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse PayPal capture response: {}", e);
            BookingError::PaymentProviderError(format!("Capture parse error: {}", e))
        })?;

        Ok(capture)
    }

    /// Order creation request body
    fn order_body(reservation_id: Uuid, total_price: f64) -> serde_json::Value {
        serde_json::json!({
            "intent": "CAPTURE",
            "purchase_units": [
                {
                    "reference_id": reservation_id.to_string(),
                    "amount": {
                        "currency_code": "USD",
                        "value": Self::format_amount(total_price),
                    },
                }
            ],
        })
    }

    /// Amount formatted the way PayPal expects (two decimals)
    pub fn format_amount(amount: f64) -> String {
        format!("{:.2}", amount)
    }
}

/// First COMPLETED capture of a capture response, if any
/// DOCUMENTATION: PayPal nests the actual money movement under
/// purchase_units[0].payments.captures[0]
pub fn extract_completed_capture(response: &CaptureOrderResponse) -> Option<&Capture> {
    response
        .purchase_units
        .first()
        .and_then(|unit| unit.payments.as_ref())
        .and_then(|payments| payments.captures.first())
        .filter(|capture| capture.status == "COMPLETED")
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn test_client(base_url: String) -> PayPalClient {
        PayPalClient::new("client-id".to_string(), "client-secret".to_string(), base_url)
    }

    fn capture_response(status: &str, capture_status: &str) -> CaptureOrderResponse {
        CaptureOrderResponse {
            id: "ORDER-1".to_string(),
            status: status.to_string(),
            purchase_units: vec![CapturePurchaseUnit {
                reference_id: Some("res-1".to_string()),
                payments: Some(CapturePayments {
                    captures: vec![Capture {
                        id: "CAP-1".to_string(),
                        status: capture_status.to_string(),
                        amount: CaptureAmount {
                            currency_code: "USD".to_string(),
                            value: "120.00".to_string(),
                        },
                    }],
                }),
            }],
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(PayPalClient::format_amount(120.0), "120.00");
        assert_eq!(PayPalClient::format_amount(99.999), "100.00");
        assert_eq!(PayPalClient::format_amount(0.1), "0.10");
    }

    #[test]
    fn test_order_body_shape() {
        let id = Uuid::new_v4();
        let body = PayPalClient::order_body(id, 250.5);

        assert_eq!(body["intent"], "CAPTURE");
        assert_eq!(body["purchase_units"][0]["reference_id"], id.to_string());
        assert_eq!(body["purchase_units"][0]["amount"]["currency_code"], "USD");
        assert_eq!(body["purchase_units"][0]["amount"]["value"], "250.50");
    }

    #[test]
    fn test_extract_completed_capture() {
        let ok = capture_response("COMPLETED", "COMPLETED");
        let capture = extract_completed_capture(&ok).unwrap();
        assert_eq!(capture.id, "CAP-1");
        assert_eq!(capture.amount.value, "120.00");

        let declined = capture_response("COMPLETED", "DECLINED");
        assert!(extract_completed_capture(&declined).is_none());

        let empty = CaptureOrderResponse {
            id: "ORDER-2".to_string(),
            status: "COMPLETED".to_string(),
            purchase_units: vec![],
        };
        assert!(extract_completed_capture(&empty).is_none());
    }

    #[tokio::test]
    async fn test_get_access_token_and_cache() {
        let server = MockServer::start();

        let token_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/oauth2/token")
                .body("grant_type=client_credentials");
            then.status(200).json_body(serde_json::json!({
                "access_token": "A.token",
                "token_type": "Bearer",
                "expires_in": 32400
            }));
        });

        let client = test_client(server.base_url());

        let first = client.get_access_token().await.unwrap();
        let second = client.get_access_token().await.unwrap();

        assert_eq!(first, "A.token");
        assert_eq!(second, "A.token");
        // Second call must be served from cache
        token_mock.assert_hits(1);
    }

    #[tokio::test]
    async fn test_create_order() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/v1/oauth2/token");
            then.status(200).json_body(serde_json::json!({
                "access_token": "A.token",
                "expires_in": 32400
            }));
        });

        let order_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v2/checkout/orders")
                .header("authorization", "Bearer A.token");
            then.status(201).json_body(serde_json::json!({
                "id": "5O190127TN364715T",
                "status": "CREATED"
            }));
        });

        let client = test_client(server.base_url());
        let order = client.create_order(Uuid::new_v4(), 120.0).await.unwrap();

        assert_eq!(order.id, "5O190127TN364715T");
        assert_eq!(order.status, "CREATED");
        order_mock.assert();
    }

    #[tokio::test]
    async fn test_capture_order_completed() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/v1/oauth2/token");
            then.status(200).json_body(serde_json::json!({
                "access_token": "A.token",
                "expires_in": 32400
            }));
        });

        server.mock(|when, then| {
            when.method(POST).path("/v2/checkout/orders/ORDER-1/capture");
            then.status(201).json_body(serde_json::json!({
                "id": "ORDER-1",
                "status": "COMPLETED",
                "purchase_units": [{
                    "reference_id": "res-1",
                    "payments": {
                        "captures": [{
                            "id": "CAP-1",
                            "status": "COMPLETED",
                            "amount": { "currency_code": "USD", "value": "120.00" }
                        }]
                    }
                }]
            }));
        });

        let client = test_client(server.base_url());
        let response = client.capture_order("ORDER-1").await.unwrap();
        let capture = extract_completed_capture(&response).unwrap();

        assert_eq!(capture.id, "CAP-1");
        assert_eq!(capture.amount.currency_code, "USD");
    }

    #[tokio::test]
    async fn test_capture_order_declined_status() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/v1/oauth2/token");
            then.status(200).json_body(serde_json::json!({
                "access_token": "A.token",
                "expires_in": 32400
            }));
        });

        server.mock(|when, then| {
            when.method(POST).path("/v2/checkout/orders/ORDER-2/capture");
            then.status(422).json_body(serde_json::json!({
                "name": "UNPROCESSABLE_ENTITY",
                "details": [{ "issue": "ORDER_NOT_APPROVED" }]
            }));
        });

        let client = test_client(server.base_url());
        let err = client.capture_order("ORDER-2").await.unwrap_err();

        assert!(matches!(err, BookingError::PaymentFailed(_)));
    }

    #[tokio::test]
    async fn test_token_endpoint_failure() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/v1/oauth2/token");
            then.status(401).json_body(serde_json::json!({
                "error": "invalid_client"
            }));
        });

        let client = test_client(server.base_url());
        let err = client.get_access_token().await.unwrap_err();

        assert!(matches!(err, BookingError::PaymentProviderError(_)));
    }
}
