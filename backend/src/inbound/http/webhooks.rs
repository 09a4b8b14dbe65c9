//! Identity provider webhook receiver.
//!
//! ```text
//! POST /api/webhooks
//! ```
//!
//! Deliveries are authenticated with the svix signing headers before the
//! body is interpreted. Client mistakes (absent headers, bad signature)
//! answer `400` in plain text; failures after a delivery has been accepted
//! answer `500` so the provider retries.

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::domain::identity_events::{ID_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::domain::{IdentityEvent, WebhookHeaders, WebhookVerificationError};
use crate::inbound::http::state::HttpState;

pub const MISSING_HEADERS_BODY: &str = "Error: Missing Svix headers";
pub const VERIFICATION_ERROR_BODY: &str = "Error: Verification error";
pub const RECEIVED_MESSAGE: &str = "Webhook received";
pub const PROCESSING_FAILED_MESSAGE: &str = "Webhook processing failed";

/// JSON acknowledgement returned once a delivery has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WebhookAck {
    #[schema(example = "Webhook received")]
    pub message: String,
}

impl WebhookAck {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}

fn plain_bad_request(body: &'static str) -> HttpResponse {
    HttpResponse::BadRequest()
        .content_type(ContentType::plaintext())
        .body(body)
}

fn processing_failed() -> HttpResponse {
    HttpResponse::InternalServerError().json(WebhookAck::new(PROCESSING_FAILED_MESSAGE))
}

/// Receive a signed identity event and apply it to the local user store.
#[utoipa::path(
    post,
    path = "/api/webhooks",
    request_body(content = serde_json::Value, description = "Identity provider event envelope"),
    params(
        ("svix-id" = String, Header, description = "Delivery identifier"),
        ("svix-timestamp" = String, Header, description = "Unix timestamp of the delivery"),
        ("svix-signature" = String, Header, description = "Space separated signatures"),
    ),
    responses(
        (status = 200, description = "Delivery accepted", body = WebhookAck),
        (status = 400, description = "Missing headers or failed verification", content_type = "text/plain", body = String),
        (status = 500, description = "Delivery could not be processed", body = WebhookAck)
    ),
    tags = ["webhooks"],
    operation_id = "receiveIdentityWebhook",
    security([])
)]
#[post("/api/webhooks")]
pub async fn receive_identity_webhook(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let headers = match WebhookHeaders::from_parts(
        header(&req, ID_HEADER),
        header(&req, TIMESTAMP_HEADER),
        header(&req, SIGNATURE_HEADER),
    ) {
        Ok(headers) => headers,
        Err(err) => {
            warn!(error = %err, "webhook rejected");
            return plain_bad_request(MISSING_HEADERS_BODY);
        }
    };

    let envelope = match state.webhook_verifier.verify(&headers, &body) {
        Ok(envelope) => envelope,
        Err(WebhookVerificationError::MissingHeaders) => {
            return plain_bad_request(MISSING_HEADERS_BODY);
        }
        Err(err) => {
            warn!(svix_id = headers.id(), error = %err, "webhook verification failed");
            return plain_bad_request(VERIFICATION_ERROR_BODY);
        }
    };

    info!(
        svix_id = headers.id(),
        event_type = %envelope.event_type,
        "webhook received"
    );

    let event = match IdentityEvent::try_from(envelope) {
        Ok(event) => event,
        Err(err) => {
            error!(svix_id = headers.id(), error = %err, "webhook payload rejected");
            return processing_failed();
        }
    };

    match state.identity_sync.apply(event).await {
        Ok(_) => HttpResponse::Ok().json(WebhookAck::new(RECEIVED_MESSAGE)),
        Err(err) => {
            error!(
                svix_id = headers.id(),
                code = ?err.code(),
                message = err.message(),
                "webhook processing failed"
            );
            processing_failed()
        }
    }
}

#[cfg(test)]
#[path = "webhooks_tests.rs"]
mod tests;
