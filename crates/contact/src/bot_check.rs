use async_trait::async_trait;
use serde::Deserialize;

pub const MIN_SCORE: f64 = 0.5;
pub const SITEVERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Decides whether a verification token comes from a human.
#[async_trait]
pub trait BotCheck: Send + Sync {
    async fn verify(&self, token: &str) -> bool;
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecaptchaConfig {
    #[serde(default)]
    pub secret_key: String,
    #[serde(default = "default_verify_url")]
    pub verify_url: String,
}

impl Default for RecaptchaConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            verify_url: default_verify_url(),
        }
    }
}

fn default_verify_url() -> String {
    SITEVERIFY_URL.to_owned()
}

/// reCAPTCHA v3 `siteverify` response body.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SiteVerifyResponse {
    pub success: bool,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub challenge_ts: Option<String>,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

impl SiteVerifyResponse {
    pub fn is_human(&self) -> bool {
        self.success && self.score.is_some_and(|score| score >= MIN_SCORE)
    }
}

#[derive(Clone)]
pub struct RecaptchaClient {
    client: reqwest::Client,
    secret_key: String,
    verify_url: String,
}

impl RecaptchaClient {
    pub fn new(config: &RecaptchaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key: config.secret_key.clone(),
            verify_url: config.verify_url.clone(),
        }
    }

    pub async fn site_verify(&self, token: &str) -> Result<SiteVerifyResponse, reqwest::Error> {
        self.client
            .post(&self.verify_url)
            .form(&[("secret", self.secret_key.as_str()), ("response", token)])
            .send()
            .await?
            .error_for_status()?
            .json::<SiteVerifyResponse>()
            .await
    }
}

#[async_trait]
impl BotCheck for RecaptchaClient {
    /// Fails closed: an unreachable or misbehaving verification service never
    /// counts as a human.
    async fn verify(&self, token: &str) -> bool {
        match self.site_verify(token).await {
            Ok(response) => {
                let human = response.is_human();
                if !human {
                    tracing::info!(
                        success = response.success,
                        score = ?response.score,
                        error_codes = ?response.error_codes,
                        "reCAPTCHA rejected submission"
                    );
                }

                human
            }
            Err(err) => {
                tracing::warn!(error = %err, "reCAPTCHA verification request failed");

                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(success: bool, score: Option<f64>) -> SiteVerifyResponse {
        SiteVerifyResponse {
            success,
            score,
            action: None,
            hostname: None,
            challenge_ts: None,
            error_codes: Vec::new(),
        }
    }

    #[test]
    fn test_is_human_requires_success_and_score() {
        assert!(response(true, Some(0.9)).is_human());
        assert!(response(true, Some(0.5)).is_human());
        assert!(!response(true, Some(0.49)).is_human());
        assert!(!response(true, Some(0.2)).is_human());
        assert!(!response(false, Some(0.9)).is_human());
        assert!(!response(true, None).is_human());
    }

    #[test]
    fn test_deserialize_error_codes() -> serde_json::Result<()> {
        let response: SiteVerifyResponse = serde_json::from_str(
            r#"{"success":false,"error-codes":["invalid-input-response","timeout-or-duplicate"]}"#,
        )?;

        assert!(!response.success);
        assert_eq!(response.score, None);
        assert_eq!(response.error_codes.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_service_fails_closed() {
        let client = RecaptchaClient::new(&RecaptchaConfig {
            secret_key: "secret".to_owned(),
            verify_url: "http://127.0.0.1:9/recaptcha/api/siteverify".to_owned(),
        });

        assert!(!client.verify("tok123").await);
    }
}
