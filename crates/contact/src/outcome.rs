use serde::Serialize;

use crate::{Locale, Violation};

/// Body returned to the website for every submission.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Terminal state reached by one submission.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The body could not be parsed, the locale is unknown.
    Malformed,
    ValidationFailed {
        locale: Locale,
        violations: Vec<Violation>,
    },
    BotRejected {
        locale: Locale,
    },
    SendFailed {
        locale: Locale,
    },
    Sent {
        locale: Locale,
    },
}

impl Outcome {
    pub fn locale(&self) -> Locale {
        match self {
            Outcome::Malformed => Locale::default(),
            Outcome::ValidationFailed { locale, .. }
            | Outcome::BotRejected { locale }
            | Outcome::SendFailed { locale }
            | Outcome::Sent { locale } => *locale,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Sent { .. })
    }

    pub fn result(&self) -> SubmissionResult {
        let locale = self.locale().as_ref().to_owned();
        let key = match self {
            Outcome::ValidationFailed { .. } => "result.validation_failed",
            Outcome::BotRejected { .. } => "result.bot_rejected",
            Outcome::Malformed | Outcome::SendFailed { .. } => "result.server_error",
            Outcome::Sent { .. } => "result.sent",
        };

        let errors = match self {
            Outcome::ValidationFailed { locale, violations } => Some(
                violations
                    .iter()
                    .map(|violation| violation.message(*locale))
                    .collect(),
            ),
            _ => None,
        };

        SubmissionResult {
            success: self.is_success(),
            message: rust_i18n::t!(key, locale = locale).to_string(),
            errors,
        }
    }
}
