use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use crate::model::{DATE_FORMAT, InvoiceStatus};

/// Display symbols for the currencies offered by the editor.
pub const CURRENCY_SYMBOLS: [(&str, &str); 6] = [
    ("GHS", "₵"),
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("NGN", "₦"),
    ("ZAR", "R"),
];

/// Human names for the same codes, used by the editor's currency picker.
pub const CURRENCY_NAMES: [(&str, &str); 6] = [
    ("GHS", "Ghana Cedis"),
    ("USD", "US Dollar"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("NGN", "Nigerian Naira"),
    ("ZAR", "South African Rand"),
];

pub fn currency_symbol(code: &str) -> &str {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| *s)
        .unwrap_or(code)
}

pub fn format_currency(amount: f64, code: &str) -> String {
    // Adding +0.0 turns -0.0 into 0.0 and leaves every other value alone.
    format!("{}{:.2}", currency_symbol(code), amount + 0.0)
}

/// `YYYY-MM-DD` (or a full RFC 3339 timestamp) rendered as `MM/DD/YYYY`.
pub fn format_date(value: &str) -> String {
    let value = value.trim();
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()));

    match date {
        Some(d) => d.format("%m/%d/%Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusStyle {
    Positive,
    Negative,
    Neutral,
}

impl StatusStyle {
    pub fn for_status(status: InvoiceStatus) -> Self {
        match status {
            InvoiceStatus::Paid => StatusStyle::Positive,
            InvoiceStatus::Overdue => StatusStyle::Negative,
            InvoiceStatus::Unpaid => StatusStyle::Neutral,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusStyle::Positive => "badge badge-paid",
            StatusStyle::Negative => "badge badge-overdue",
            StatusStyle::Neutral => "badge badge-unpaid",
        }
    }
}
