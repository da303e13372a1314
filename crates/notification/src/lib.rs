pub mod contact;
mod service;
pub mod template;

pub use service::*;

rust_i18n::i18n!("locales", fallback = "en");
