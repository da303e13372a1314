use strum::{AsRefStr, Display, EnumString};

/// Language of the templates and response messages for one submission.
#[derive(EnumString, Display, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locale {
    #[default]
    #[strum(serialize = "en")]
    English,
    #[strum(serialize = "es-MX")]
    SpanishMexico,
}

impl Locale {
    /// Resolves the optional tag sent by the client. Only an exact `es-MX`
    /// selects Spanish, every other value falls back to English.
    pub fn from_tag(tag: Option<&str>) -> Self {
        tag.and_then(|tag| tag.parse().ok()).unwrap_or_default()
    }

    pub fn is_spanish(&self) -> bool {
        matches!(self, Locale::SpanishMexico)
    }
}
