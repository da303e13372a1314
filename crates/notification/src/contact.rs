use askama::Template;
use larios_contact::{Locale, SubmissionRequest};
use time::OffsetDateTime;

use crate::{
    EmailConfig, MailError, Mailer, OutgoingEmail,
    template::{
        BusinessNotificationHtml, ConfirmationEnHtml, ConfirmationEsHtml, escape_html,
        format_submitted_at, message_to_html,
    },
};

pub const BUSINESS_SUBJECT_PREFIX: &str = "Contact Form: ";

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to render email: {0}")]
    Render(#[from] askama::Error),

    #[error("failed to format submission time: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error("business notification not sent: {0}")]
    Business(#[source] MailError),

    #[error("confirmation not sent: {0}")]
    Confirmation(#[source] MailError),
}

/// The two messages produced by one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactEmails {
    pub business: OutgoingEmail,
    pub confirmation: OutgoingEmail,
}

impl ContactEmails {
    pub fn compose(
        request: &SubmissionRequest,
        config: &EmailConfig,
        time_zone: &str,
        submitted_at: OffsetDateTime,
    ) -> Result<Self, DispatchError> {
        let business = OutgoingEmail {
            from: config.from_address.to_owned(),
            to: config.contact_address.to_owned(),
            subject: format!(
                "{BUSINESS_SUBJECT_PREFIX}{}",
                single_line(&request.subject)
            ),
            html: BusinessNotificationHtml {
                name: escape_html(&request.name),
                email: escape_html(&request.email),
                subject: escape_html(&request.subject),
                message: message_to_html(&request.message),
                submitted_at: format_submitted_at(submitted_at, time_zone)?,
            }
            .render()?,
        };

        let locale = request.locale();
        let name = escape_html(&request.name);
        let html = match locale {
            Locale::SpanishMexico => ConfirmationEsHtml { name }.render()?,
            Locale::English => ConfirmationEnHtml { name }.render()?,
        };

        let confirmation = OutgoingEmail {
            from: config.from_address.to_owned(),
            to: request.email.to_owned(),
            subject: rust_i18n::t!("contact.confirmation_subject", locale = locale.as_ref())
                .to_string(),
            html,
        };

        Ok(Self {
            business,
            confirmation,
        })
    }
}

/// Mail header values cannot carry line breaks.
fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// Sends the business notification, then the confirmation. The confirmation
/// is only attempted once the notification was accepted.
pub async fn send_contact_emails(
    mailer: &dyn Mailer,
    emails: ContactEmails,
) -> Result<(), DispatchError> {
    tracing::info!(to = %emails.business.to, "Sending business notification email");
    mailer
        .send(emails.business)
        .await
        .map_err(DispatchError::Business)?;

    tracing::info!(to = %emails.confirmation.to, "Sending customer confirmation email");
    mailer
        .send(emails.confirmation)
        .await
        .map_err(DispatchError::Confirmation)?;

    Ok(())
}
