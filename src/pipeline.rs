//! Parse, validate, verify and relay one contact form submission.

use std::sync::Arc;

use larios_contact::{BotCheck, Outcome, SubmissionRequest};
use larios_notification::{
    EmailConfig, Mailer,
    contact::{ContactEmails, send_contact_emails},
};
use time::OffsetDateTime;

#[derive(Clone)]
pub struct ContactPipeline {
    bot_check: Arc<dyn BotCheck>,
    mailer: Arc<dyn Mailer>,
    email: EmailConfig,
    time_zone: String,
}

impl ContactPipeline {
    pub fn new(
        bot_check: Arc<dyn BotCheck>,
        mailer: Arc<dyn Mailer>,
        email: EmailConfig,
        time_zone: impl Into<String>,
    ) -> Self {
        Self {
            bot_check,
            mailer,
            email,
            time_zone: time_zone.into(),
        }
    }

    /// Each step runs only when the previous one succeeded; the first
    /// failure is the final outcome.
    #[tracing::instrument(skip_all)]
    pub async fn process(&self, body: &[u8]) -> Outcome {
        let request: SubmissionRequest = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(error = %err, "Unparsable contact form payload");

                return Outcome::Malformed;
            }
        };

        tracing::info!("Contact form submission received");

        let locale = request.locale();
        let violations = request.violations();
        if !violations.is_empty() {
            tracing::info!(violations = ?violations, "Contact form validation failed");

            return Outcome::ValidationFailed { locale, violations };
        }

        if !self.bot_check.verify(&request.verification_token).await {
            tracing::info!("reCAPTCHA verification failed");

            return Outcome::BotRejected { locale };
        }

        if let Err(err) = self.dispatch(&request).await {
            tracing::error!(error = %err, "Error processing contact form");

            return Outcome::SendFailed { locale };
        }

        tracing::info!("Emails sent successfully");

        Outcome::Sent { locale }
    }

    async fn dispatch(
        &self,
        request: &SubmissionRequest,
    ) -> Result<(), larios_notification::contact::DispatchError> {
        let emails = ContactEmails::compose(
            request,
            &self.email,
            &self.time_zone,
            OffsetDateTime::now_utc(),
        )?;

        send_contact_emails(self.mailer.as_ref(), emails).await
    }
}
