use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::core::pricing::CheckoutAmount;
use crate::models::{CheckoutResponse, CreateCheckoutRequest, ErrorResponse, WebhookAck};
use crate::routes::AppState;
use crate::services::{interpret_event, WebhookEvent, WebhookOutcome};

/// Header carrying the processor's webhook signature
const SIGNATURE_HEADER: &str = "stripe-signature";

/// Configure checkout and payment webhook routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/create-checkout", web::post().to(create_checkout))
        .route("/webhook/stripe", web::post().to(payment_webhook));
}

/// Create a checkout session for unlocking the full result
///
/// POST /api/create-checkout
///
/// Request body:
/// ```json
/// {
///   "amount": 20,
///   "sessionId": "session-1700000000000-abc123def"
/// }
/// ```
async fn create_checkout(
    state: web::Data<AppState>,
    req: web::Json<CreateCheckoutRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    let amount = match CheckoutAmount::parse(&req.amount, state.min_amount_cents) {
        Ok(amount) => amount,
        Err(e) => {
            tracing::info!("Rejected checkout amount {:?} for {}: {}", req.amount, req.session_id, e);
            return HttpResponse::BadRequest().json(ErrorResponse::new("Invalid amount", e.to_string(), 400));
        }
    };

    match state
        .checkout
        .create_session(&req.session_id, amount, &req.amount)
        .await
    {
        Ok(session) => {
            tracing::info!(
                "Checkout {} created for session {} (${})",
                session.checkout_session_id,
                req.session_id,
                amount.dollars_display()
            );
            HttpResponse::Ok().json(CheckoutResponse {
                checkout_url: session.checkout_url,
                session_id: session.checkout_session_id,
                message: session.mock_message,
            })
        }
        Err(e) => {
            tracing::error!("Error creating checkout session for {}: {}", req.session_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to create checkout session",
                e.to_string(),
                500,
            ))
        }
    }
}

/// Payment processor webhook
///
/// POST /api/webhook/stripe
///
/// Database failures are logged but still acknowledged so the processor
/// does not retry indefinitely.
async fn payment_webhook(
    state: web::Data<AppState>,
    body: web::Bytes,
    req: HttpRequest,
) -> impl Responder {
    if req.headers().get(SIGNATURE_HEADER).is_none() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Missing signature",
            "No signature provided",
            400,
        ));
    }

    let event: WebhookEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Unparseable webhook payload: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "Invalid payload",
                "Webhook payload could not be parsed",
                400,
            ));
        }
    };

    match interpret_event(&event) {
        WebhookOutcome::PaymentCompleted { session_id, info } => {
            match state.postgres.update_payment_info(&session_id, &info).await {
                Ok(true) => tracing::info!(
                    "Payment completed for session {} ({} cents)",
                    session_id,
                    info.amount_cents
                ),
                Ok(false) => tracing::warn!("Payment completed for unknown session {}", session_id),
                Err(e) => tracing::error!("Error updating payment info for {}: {}", session_id, e),
            }
        }
        WebhookOutcome::MissingDetails { checkout_session_id, session_id, email } => {
            tracing::warn!(
                "Missing sessionId or email in checkout session {}: sessionId={:?}, email_present={}",
                checkout_session_id,
                session_id,
                email.is_some()
            );
        }
        WebhookOutcome::PaymentIntentSucceeded(id) => {
            tracing::info!("PaymentIntent succeeded: {}", id);
        }
        WebhookOutcome::Ignored(event_type) => {
            tracing::debug!("Unhandled webhook event type: {}", event_type);
        }
    }

    HttpResponse::Ok().json(WebhookAck { received: true })
}
