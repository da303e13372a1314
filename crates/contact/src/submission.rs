use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use strum::VariantArray;
use validator::{Validate, ValidationError};

use crate::Locale;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Contact form payload posted by the website.
///
/// Missing keys and `null` values deserialize to empty strings so they are
/// reported by the validator instead of failing the whole parse.
#[derive(Deserialize, Validate, Default, Clone, Debug)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmissionRequest {
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(regex(path = *EMAIL_PATTERN))]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank"))]
    pub subject: String,
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank"))]
    pub message: String,
    #[serde(alias = "recaptchaToken", deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub verification_token: String,
    pub locale: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }

    Ok(())
}

/// Validation rules, declared in the order they are reported.
#[derive(VariantArray, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    NameRequired,
    EmailInvalid,
    SubjectRequired,
    MessageRequired,
    TokenRequired,
}

impl Violation {
    fn field(&self) -> &'static str {
        match self {
            Violation::NameRequired => "name",
            Violation::EmailInvalid => "email",
            Violation::SubjectRequired => "subject",
            Violation::MessageRequired => "message",
            Violation::TokenRequired => "verification_token",
        }
    }

    pub fn message(&self, locale: Locale) -> String {
        let key = match self {
            Violation::NameRequired => "validation.name_required",
            Violation::EmailInvalid => "validation.email_invalid",
            Violation::SubjectRequired => "validation.subject_required",
            Violation::MessageRequired => "validation.message_required",
            Violation::TokenRequired => "validation.token_required",
        };

        rust_i18n::t!(key, locale = locale.as_ref()).to_string()
    }
}

impl SubmissionRequest {
    pub fn locale(&self) -> Locale {
        Locale::from_tag(self.locale.as_deref())
    }

    /// Runs every rule and returns the violated ones in declaration order.
    /// An empty list means the submission may proceed.
    pub fn violations(&self) -> Vec<Violation> {
        let Err(errors) = self.validate() else {
            return Vec::new();
        };

        let fields = errors.field_errors();

        Violation::VARIANTS
            .iter()
            .filter(|violation| fields.contains_key(violation.field()))
            .copied()
            .collect()
    }
}
