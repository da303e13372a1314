//! Email delivery using lettre

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::header::ContentType,
    transport::smtp::authentication::Credentials,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default)]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default)]
    pub from_address: String,
    #[serde(default)]
    pub contact_address: String,
    /// Connect with TLS from the first byte (SMTPS, usually port 465)
    /// instead of upgrading a plain connection with STARTTLS.
    #[serde(default)]
    pub smtp_implicit_tls: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: String::new(),
            contact_address: String::new(),
            smtp_implicit_tls: false,
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

const SMTPS_PORT: u16 = 465;

impl EmailConfig {
    pub fn uses_implicit_tls(&self) -> bool {
        self.smtp_implicit_tls || self.smtp_port == SMTPS_PORT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("email transport is not configured")]
    NotConfigured,

    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Hands a message to the provider. Resolves once the provider has accepted
/// or refused it.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

/// SMTP backed [`Mailer`]
#[derive(Clone)]
pub struct EmailService {
    mailer: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl EmailService {
    /// Builds the transport from configuration. A transport that cannot be
    /// built is reported at the first send, not here.
    pub fn new(config: &EmailConfig) -> Self {
        if config.smtp_host.is_empty() {
            tracing::warn!("SMTP host not configured, every send will fail");

            return Self { mailer: None };
        }

        if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );

            let mailer = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build();

            return Self {
                mailer: Some(mailer),
            };
        }

        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let builder = if config.uses_implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        };

        match builder {
            Ok(builder) => {
                tracing::info!(
                    smtp_host = %config.smtp_host,
                    smtp_port = config.smtp_port,
                    implicit_tls = config.uses_implicit_tls(),
                    from = %config.from_address,
                    "Email service initialized with authentication and TLS"
                );

                Self {
                    mailer: Some(builder.port(config.smtp_port).credentials(creds).build()),
                }
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    smtp_host = %config.smtp_host,
                    "Failed to create SMTP relay, every send will fail"
                );

                Self { mailer: None }
            }
        }
    }
}

#[async_trait]
impl Mailer for EmailService {
    #[tracing::instrument(skip_all, fields(to = %email.to, subject = %email.subject))]
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let Some(mailer) = &self.mailer else {
            return Err(MailError::NotConfigured);
        };

        let message = Message::builder()
            .from(email.from.parse()?)
            .to(email.to.parse()?)
            .subject(email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html)?;

        mailer.send(message).await?;

        tracing::info!("Email accepted by SMTP server");

        Ok(())
    }
}
