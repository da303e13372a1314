//! Test doubles for the two outbound collaborators and router plumbing.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use larios_api::{AppState, ContactPipeline};
use larios_contact::{BotCheck, SiteVerifyResponse};
use larios_notification::{EmailConfig, MailError, Mailer, OutgoingEmail};
use serde_json::Value;
use tower::ServiceExt;

pub const FROM_ADDRESS: &str = "noreply@lariostax.com";
pub const CONTACT_ADDRESS: &str = "office@lariostax.com";

/// Answers every token with the same canned siteverify response.
pub struct CannedBotCheck {
    response: SiteVerifyResponse,
    pub tokens: Mutex<Vec<String>>,
}

impl CannedBotCheck {
    pub fn new(success: bool, score: f64) -> Self {
        Self {
            response: SiteVerifyResponse {
                success,
                score: Some(score),
                action: Some("contact".to_owned()),
                hostname: Some("lariostax.com".to_owned()),
                challenge_ts: None,
                error_codes: Vec::new(),
            },
            tokens: Mutex::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

#[async_trait]
impl BotCheck for CannedBotCheck {
    async fn verify(&self, token: &str) -> bool {
        self.tokens.lock().unwrap().push(token.to_owned());

        self.response.is_human()
    }
}

/// Records every send attempt, optionally refusing the n-th one.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
    fail_on: Option<usize>,
}

impl RecordingMailer {
    pub fn failing_on(attempt: usize) -> Self {
        Self {
            sent: Mutex::default(),
            fail_on: Some(attempt),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let mut sent = self.sent.lock().unwrap();
        let attempt = sent.len();
        sent.push(email);

        if self.fail_on == Some(attempt) {
            return Err(MailError::NotConfigured);
        }

        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub pipeline: ContactPipeline,
    pub bot_check: Arc<CannedBotCheck>,
    pub mailer: Arc<RecordingMailer>,
}

pub fn create_test_app(bot_check: CannedBotCheck, mailer: RecordingMailer) -> TestApp {
    let bot_check = Arc::new(bot_check);
    let mailer = Arc::new(mailer);

    let pipeline = ContactPipeline::new(
        bot_check.clone(),
        mailer.clone(),
        EmailConfig {
            from_address: FROM_ADDRESS.to_owned(),
            contact_address: CONTACT_ADDRESS.to_owned(),
            ..EmailConfig::default()
        },
        "America/Los_Angeles",
    );

    TestApp {
        router: larios_api::router(AppState {
            pipeline: pipeline.clone(),
        }),
        pipeline,
        bot_check,
        mailer,
    }
}

pub fn human_app() -> TestApp {
    create_test_app(CannedBotCheck::new(true, 0.9), RecordingMailer::default())
}

pub fn valid_payload() -> Value {
    serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "subject": "Tax question",
        "message": "Hello",
        "verificationToken": "tok123"
    })
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub async fn send(router: &Router, method: Method, body: impl Into<Body>) -> TestResponse {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri("/api/contactForm")
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body: body.to_vec(),
    }
}

pub async fn post_json(router: &Router, payload: &Value) -> TestResponse {
    send(router, Method::POST, payload.to_string()).await
}
