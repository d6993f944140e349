use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::InvoiceError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Days between the invoice date and the seeded due date.
pub const DEFAULT_PAYMENT_DAYS: u64 = 15;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InvoiceItem {
    pub id: String,
    pub description: String,
    pub quantity: f64,
    pub rate: f64,
    pub amount: f64,
}

impl InvoiceItem {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        quantity: f64,
        rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            quantity,
            rate,
            amount: quantity * rate,
        }
    }

    /// A freshly added row: nothing billed yet.
    pub fn blank(id: impl Into<String>) -> Self {
        Self::new(id, "", 0.0, 0.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvoiceStatus {
    Paid,
    #[default]
    Unpaid,
    Overdue,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 3] = [
        InvoiceStatus::Unpaid,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "PAID",
            InvoiceStatus::Unpaid => "UNPAID",
            InvoiceStatus::Overdue => "OVERDUE",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PAID" => Ok(InvoiceStatus::Paid),
            "UNPAID" => Ok(InvoiceStatus::Unpaid),
            "OVERDUE" => Ok(InvoiceStatus::Overdue),
            _ => Err(InvoiceError::UnknownStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Company {
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BillTo {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
}

/// Subtotal, total and amount due. Always derived from the items.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub subtotal: f64,
    pub total: f64,
    pub amount_due: f64,
}

impl Totals {
    pub fn from_items(items: &[InvoiceItem]) -> Self {
        // Start from +0.0: an empty `sum()` of f64 yields -0.0.
        let subtotal = items.iter().fold(0.0, |acc, i| acc + i.amount);
        // No tax or discount: everything passes straight through.
        Self {
            subtotal,
            total: subtotal,
            amount_due: subtotal,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InvoiceData {
    pub company: Company,
    pub currency: String,

    pub invoice_number: String,
    pub invoice_date: String,
    pub due_date: String,
    #[serde(default)]
    pub status: InvoiceStatus,

    pub bill_to: BillTo,

    #[serde(default)]
    pub items: Vec<InvoiceItem>,

    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub terms: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_link: Option<String>,
}

impl InvoiceData {
    /// The invoice a fresh editor starts from.
    pub fn seed(today: NaiveDate) -> Self {
        let due = today
            .checked_add_days(Days::new(DEFAULT_PAYMENT_DAYS))
            .unwrap_or(today);

        Self {
            company: Company {
                name: "Quantum Labs".into(),
                address: "Innovation Hub, Tech District".into(),
                city: "Accra, Ghana".into(),
                phone: "+233 XX XXX XXXX".into(),
                email: "info@quantumlabs.com".into(),
                logo: Some("/quantum-labs-logo.png".into()),
            },
            currency: "GHS".into(),
            invoice_number: "INV-001727".into(),
            invoice_date: today.format(DATE_FORMAT).to_string(),
            due_date: due.format(DATE_FORMAT).to_string(),
            status: InvoiceStatus::Unpaid,
            bill_to: BillTo {
                name: "Client Name".into(),
                address: "Client Address".into(),
                city: "Client City".into(),
                country: "Ghana".into(),
            },
            items: vec![
                InvoiceItem::new("1", "Data Analytics Consultation", 1.0, 2500.0),
                InvoiceItem::new("2", "Machine Learning Model Development", 1.0, 5000.0),
            ],
            notes: "Thank you for choosing Quantum Labs for your data innovation needs.".into(),
            terms: concat!(
                "Payment due within 15 days of invoice date.\n",
                "Late payments may incur additional charges."
            )
            .into(),
            payment_link: None,
        }
    }

    pub fn totals(&self) -> Totals {
        Totals::from_items(&self.items)
    }

    pub fn item(&self, id: &str) -> Option<&InvoiceItem> {
        self.items.iter().find(|i| i.id == id)
    }
}
