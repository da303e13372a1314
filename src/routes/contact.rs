use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{
        HeaderName, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
    },
    response::{IntoResponse, Response},
};
use larios_contact::Outcome;

use crate::routes::AppState;

const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
    (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

pub fn status(outcome: &Outcome) -> StatusCode {
    match outcome {
        Outcome::Sent { .. } => StatusCode::OK,
        Outcome::ValidationFailed { .. } | Outcome::BotRejected { .. } => StatusCode::BAD_REQUEST,
        Outcome::Malformed | Outcome::SendFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// OPTIONS /api/contactForm
pub async fn preflight() -> impl IntoResponse {
    (StatusCode::NO_CONTENT, CORS_HEADERS)
}

/// POST /api/contactForm
///
/// The raw body is taken so that a payload which cannot be read or parsed
/// goes through the same error response as any other server side failure.
pub async fn action(
    State(app_state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let outcome = match body {
        Ok(body) => app_state.pipeline.process(&body).await,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unreadable contact form body");

            Outcome::Malformed
        }
    };

    (status(&outcome), CORS_HEADERS, Json(outcome.result())).into_response()
}
