mod bot_check;
mod locale;
mod outcome;
mod submission;

pub use bot_check::*;
pub use locale::Locale;
pub use outcome::*;
pub use submission::*;

rust_i18n::i18n!("locales", fallback = "en");
