use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::pipeline::ContactPipeline;

mod contact;
mod health;

pub const CONTACT_FORM_PATH: &str = "/api/contactForm";

#[derive(Clone)]
pub struct AppState {
    pub pipeline: ContactPipeline,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            CONTACT_FORM_PATH,
            post(contact::action).options(contact::preflight),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
