//! HTML bodies of the contact emails.
//!
//! Auto-escaping is turned off on every template: interpolated values are
//! escaped with [`escape_html`] before they reach the template, so each one
//! is encoded exactly once.

use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};
use time_tz::{ToTimezone, timezones};

const SUBMITTED_AT_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[month padding:none]/[day padding:none]/[year], [hour repr:12 padding:none]:[minute]:[second] [period]"
);

/// Replaces `& < > " '` by their entities.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            c => escaped.push(c),
        }
    }

    escaped
}

/// Escapes a multi-line message and keeps its line breaks.
pub fn message_to_html(message: &str) -> String {
    escape_html(message).replace('\n', "<br>")
}

/// Formats `at` in the named IANA zone, UTC when the zone is unknown.
pub fn format_submitted_at(
    at: OffsetDateTime,
    time_zone: &str,
) -> Result<String, time::error::Format> {
    let at = match timezones::get_by_name(time_zone) {
        Some(tz) => at.to_timezone(tz),
        None => {
            tracing::warn!(time_zone, "Unknown business time zone, using UTC");
            at
        }
    };

    at.format(SUBMITTED_AT_FORMAT)
}

#[derive(askama::Template)]
#[template(path = "contact/business.html", escape = "none")]
pub struct BusinessNotificationHtml {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub submitted_at: String,
}

#[derive(askama::Template)]
#[template(path = "contact/confirmation-en.html", escape = "none")]
pub struct ConfirmationEnHtml {
    pub name: String,
}

#[derive(askama::Template)]
#[template(path = "contact/confirmation-es.html", escape = "none")]
pub struct ConfirmationEsHtml {
    pub name: String,
}
