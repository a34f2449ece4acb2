use crate::core::pricing::{AmountInput, CheckoutAmount};
use crate::models::PaymentInfo;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the payment processor
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Payment processor returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: payment processor rejected the secret key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Product and redirect details for checkout sessions
#[derive(Debug, Clone)]
pub struct CheckoutProduct {
    pub name: String,
    pub description: String,
    pub currency: String,
}

/// A created checkout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub checkout_url: String,
    pub checkout_session_id: String,
    /// Set when no real processor call was made
    pub mock_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProcessorSession {
    id: String,
    url: Option<String>,
}

/// Payment processor (Stripe-compatible) client
///
/// Falls back to a mock checkout that redirects straight to the success
/// page when no usable secret key is configured, so the full quiz flow
/// works in development.
pub struct CheckoutClient {
    api_base: String,
    secret_key: Option<String>,
    base_url: String,
    product: CheckoutProduct,
    client: Client,
}

impl CheckoutClient {
    pub fn new(
        api_base: String,
        secret_key: Option<String>,
        base_url: String,
        product: CheckoutProduct,
    ) -> Result<Self, CheckoutError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            api_base,
            secret_key: secret_key.filter(|key| !key.is_empty()),
            base_url,
            product,
            client,
        })
    }

    /// Secret key usable against the real API
    fn live_key(&self) -> Option<&str> {
        match self.secret_key.as_deref() {
            Some(key) if key.starts_with("sk_") => Some(key),
            Some(_) => {
                tracing::warn!("Payment secret key format is incorrect, keys start with sk_live_ or sk_test_");
                None
            }
            None => None,
        }
    }

    /// Start a checkout for a quiz session
    pub async fn create_session(
        &self,
        session_id: &str,
        amount: CheckoutAmount,
        raw_amount: &AmountInput,
    ) -> Result<CheckoutSession, CheckoutError> {
        if let Some(key) = self.live_key() {
            match self.create_processor_session(key, session_id, amount, raw_amount).await {
                Ok(session) => return Ok(session),
                Err(CheckoutError::Unauthorized) => {
                    tracing::warn!("Payment processor rejected the secret key, falling back to mock checkout");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(self.mock_session(session_id, raw_amount))
    }

    async fn create_processor_session(
        &self,
        key: &str,
        session_id: &str,
        amount: CheckoutAmount,
        raw_amount: &AmountInput,
    ) -> Result<CheckoutSession, CheckoutError> {
        let url = format!("{}/v1/checkout/sessions", self.api_base.trim_end_matches('/'));
        let encoded_session = urlencoding::encode(session_id);
        let base = self.base_url.trim_end_matches('/');

        let form: Vec<(&str, String)> = vec![
            ("mode", "payment".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            ("line_items[0][price_data][currency]", self.product.currency.clone()),
            ("line_items[0][price_data][unit_amount]", amount.cents().to_string()),
            ("line_items[0][price_data][product_data][name]", self.product.name.clone()),
            ("line_items[0][price_data][product_data][description]", self.product.description.clone()),
            ("success_url", format!("{}/result?session={}&payment=success", base, encoded_session)),
            ("cancel_url", format!("{}/result?session={}&payment=cancelled", base, encoded_session)),
            ("metadata[sessionId]", session_id.to_string()),
            ("metadata[amount]", raw_amount.raw()),
            ("payment_method_options[card][request_three_d_secure]", "automatic".to_string()),
        ];

        tracing::debug!("Creating checkout session for {} ({} cents)", session_id, amount.cents());

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(CheckoutError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CheckoutError::ApiError(format!("{}: {}", status, body)));
        }

        let session: ProcessorSession = response
            .json()
            .await
            .map_err(|e| CheckoutError::InvalidResponse(format!("Failed to parse checkout session: {}", e)))?;

        let checkout_url = session
            .url
            .ok_or_else(|| CheckoutError::InvalidResponse("Checkout session has no url".into()))?;

        Ok(CheckoutSession {
            checkout_url,
            checkout_session_id: session.id,
            mock_message: None,
        })
    }

    fn mock_session(&self, session_id: &str, raw_amount: &AmountInput) -> CheckoutSession {
        tracing::info!("Creating mock checkout for session {}", session_id);

        CheckoutSession {
            checkout_url: format!(
                "/result?session={}&payment=success&amount={}",
                urlencoding::encode(session_id),
                urlencoding::encode(&raw_amount.raw())
            ),
            checkout_session_id: format!("checkout_{}", chrono::Utc::now().timestamp_millis()),
            mock_message: Some(
                "Checkout session created (mock mode - configure a payment secret key for production)"
                    .to_string(),
            ),
        }
    }
}

/// Event posted by the payment processor webhook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookData {
    pub object: Value,
}

#[derive(Debug, Deserialize)]
struct CustomerDetails {
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletedCheckout {
    id: String,
    #[serde(default)]
    metadata: Option<HashMap<String, String>>,
    #[serde(default)]
    customer_details: Option<CustomerDetails>,
    #[serde(default)]
    customer_email: Option<String>,
    #[serde(default)]
    amount_total: Option<i64>,
}

/// What a webhook event means for the quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    PaymentCompleted { session_id: String, info: PaymentInfo },
    MissingDetails {
        checkout_session_id: String,
        session_id: Option<String>,
        email: Option<String>,
    },
    PaymentIntentSucceeded(String),
    Ignored(String),
}

/// Interpret a webhook event without side effects
pub fn interpret_event(event: &WebhookEvent) -> WebhookOutcome {
    match event.event_type.as_str() {
        "checkout.session.completed" => {
            let checkout: CompletedCheckout = match serde_json::from_value(event.data.object.clone()) {
                Ok(checkout) => checkout,
                Err(e) => {
                    tracing::warn!("Malformed checkout.session.completed payload: {}", e);
                    return WebhookOutcome::Ignored(event.event_type.clone());
                }
            };

            let session_id = checkout
                .metadata
                .as_ref()
                .and_then(|metadata| metadata.get("sessionId"))
                .filter(|id| !id.is_empty())
                .cloned();
            let email = checkout
                .customer_details
                .and_then(|details| details.email)
                .or(checkout.customer_email)
                .filter(|email| !email.is_empty());

            match (session_id, email) {
                (Some(session_id), Some(email)) => WebhookOutcome::PaymentCompleted {
                    session_id,
                    info: PaymentInfo {
                        email,
                        amount_cents: checkout.amount_total.unwrap_or(0),
                        checkout_session_id: checkout.id,
                    },
                },
                (session_id, email) => WebhookOutcome::MissingDetails {
                    checkout_session_id: checkout.id,
                    session_id,
                    email,
                },
            }
        }
        "payment_intent.succeeded" => {
            let id = event
                .data
                .object
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            WebhookOutcome::PaymentIntentSucceeded(id)
        }
        other => WebhookOutcome::Ignored(other.to_string()),
    }
}
