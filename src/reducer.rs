//! Pure state transitions for the editor.
//!
//! Every edit is an [`Action`] folded into the current [`InvoiceData`] by
//! [`reduce`]. Totals are never stored, so nothing here has to keep them in
//! sync: [`InvoiceData::totals`] derives them from whatever items the reducer
//! leaves behind.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::InvoiceError;
use crate::model::{InvoiceData, InvoiceItem, InvoiceStatus};

/// Scalar invoice fields that take free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceField {
    CompanyName,
    CompanyAddress,
    CompanyCity,
    CompanyPhone,
    CompanyEmail,
    CompanyLogo,
    Currency,
    InvoiceNumber,
    InvoiceDate,
    DueDate,
    BillToName,
    BillToAddress,
    BillToCity,
    BillToCountry,
    Notes,
    Terms,
    PaymentLink,
}

impl InvoiceField {
    pub const ALL: [InvoiceField; 17] = [
        InvoiceField::CompanyName,
        InvoiceField::CompanyAddress,
        InvoiceField::CompanyCity,
        InvoiceField::CompanyPhone,
        InvoiceField::CompanyEmail,
        InvoiceField::CompanyLogo,
        InvoiceField::Currency,
        InvoiceField::InvoiceNumber,
        InvoiceField::InvoiceDate,
        InvoiceField::DueDate,
        InvoiceField::BillToName,
        InvoiceField::BillToAddress,
        InvoiceField::BillToCity,
        InvoiceField::BillToCountry,
        InvoiceField::Notes,
        InvoiceField::Terms,
        InvoiceField::PaymentLink,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            InvoiceField::CompanyName => "company-name",
            InvoiceField::CompanyAddress => "company-address",
            InvoiceField::CompanyCity => "company-city",
            InvoiceField::CompanyPhone => "company-phone",
            InvoiceField::CompanyEmail => "company-email",
            InvoiceField::CompanyLogo => "company-logo",
            InvoiceField::Currency => "currency",
            InvoiceField::InvoiceNumber => "invoice-number",
            InvoiceField::InvoiceDate => "invoice-date",
            InvoiceField::DueDate => "due-date",
            InvoiceField::BillToName => "bill-to-name",
            InvoiceField::BillToAddress => "bill-to-address",
            InvoiceField::BillToCity => "bill-to-city",
            InvoiceField::BillToCountry => "bill-to-country",
            InvoiceField::Notes => "notes",
            InvoiceField::Terms => "terms",
            InvoiceField::PaymentLink => "payment-link",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InvoiceField::CompanyName => "Company Name",
            InvoiceField::CompanyAddress => "Company Address",
            InvoiceField::CompanyCity => "Company City",
            InvoiceField::CompanyPhone => "Company Phone",
            InvoiceField::CompanyEmail => "Company Email",
            InvoiceField::CompanyLogo => "Company Logo (Optional)",
            InvoiceField::Currency => "Currency",
            InvoiceField::InvoiceNumber => "Invoice Number",
            InvoiceField::InvoiceDate => "Invoice Date",
            InvoiceField::DueDate => "Due Date",
            InvoiceField::BillToName => "Client Name",
            InvoiceField::BillToAddress => "Client Address",
            InvoiceField::BillToCity => "Client City",
            InvoiceField::BillToCountry => "Client Country",
            InvoiceField::Notes => "Notes",
            InvoiceField::Terms => "Terms & Conditions",
            InvoiceField::PaymentLink => "Payment Link (Optional)",
        }
    }

    /// Current value as shown in an input control. Absent optionals read as "".
    pub fn get(&self, data: &InvoiceData) -> String {
        match self {
            InvoiceField::CompanyName => data.company.name.clone(),
            InvoiceField::CompanyAddress => data.company.address.clone(),
            InvoiceField::CompanyCity => data.company.city.clone(),
            InvoiceField::CompanyPhone => data.company.phone.clone(),
            InvoiceField::CompanyEmail => data.company.email.clone(),
            InvoiceField::CompanyLogo => data.company.logo.clone().unwrap_or_default(),
            InvoiceField::Currency => data.currency.clone(),
            InvoiceField::InvoiceNumber => data.invoice_number.clone(),
            InvoiceField::InvoiceDate => data.invoice_date.clone(),
            InvoiceField::DueDate => data.due_date.clone(),
            InvoiceField::BillToName => data.bill_to.name.clone(),
            InvoiceField::BillToAddress => data.bill_to.address.clone(),
            InvoiceField::BillToCity => data.bill_to.city.clone(),
            InvoiceField::BillToCountry => data.bill_to.country.clone(),
            InvoiceField::Notes => data.notes.clone(),
            InvoiceField::Terms => data.terms.clone(),
            InvoiceField::PaymentLink => data.payment_link.clone().unwrap_or_default(),
        }
    }

    fn set(&self, data: &mut InvoiceData, value: String) {
        match self {
            InvoiceField::CompanyName => data.company.name = value,
            InvoiceField::CompanyAddress => data.company.address = value,
            InvoiceField::CompanyCity => data.company.city = value,
            InvoiceField::CompanyPhone => data.company.phone = value,
            InvoiceField::CompanyEmail => data.company.email = value,
            InvoiceField::CompanyLogo => data.company.logo = non_empty(value),
            InvoiceField::Currency => data.currency = value.trim().to_ascii_uppercase(),
            InvoiceField::InvoiceNumber => data.invoice_number = value,
            InvoiceField::InvoiceDate => data.invoice_date = value,
            InvoiceField::DueDate => data.due_date = value,
            InvoiceField::BillToName => data.bill_to.name = value,
            InvoiceField::BillToAddress => data.bill_to.address = value,
            InvoiceField::BillToCity => data.bill_to.city = value,
            InvoiceField::BillToCountry => data.bill_to.country = value,
            InvoiceField::Notes => data.notes = value,
            InvoiceField::Terms => data.terms = value,
            InvoiceField::PaymentLink => data.payment_link = non_empty(value),
        }
    }
}

impl fmt::Display for InvoiceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for InvoiceField {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        InvoiceField::ALL
            .into_iter()
            .find(|f| f.key() == wanted)
            .ok_or_else(|| InvoiceError::UnknownField(s.to_string()))
    }
}

/// One edit to a single line item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemChange {
    Description(String),
    Quantity(f64),
    Rate(f64),
}

impl ItemChange {
    /// Builds a change from raw text input. Numeric fields never reject input:
    /// anything that does not parse becomes zero.
    pub fn parse(field: &str, raw: &str) -> Result<Self, InvoiceError> {
        match field.trim().to_ascii_lowercase().as_str() {
            "description" | "desc" => Ok(ItemChange::Description(raw.to_string())),
            "quantity" | "qty" => Ok(ItemChange::Quantity(parse_number(raw))),
            "rate" => Ok(ItemChange::Rate(parse_number(raw))),
            _ => Err(InvoiceError::UnknownField(field.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetField { field: InvoiceField, value: String },
    SetStatus(InvoiceStatus),
    AddItem,
    UpdateItem { id: String, change: ItemChange },
    RemoveItem { id: String },
}

pub fn reduce(mut state: InvoiceData, action: Action) -> InvoiceData {
    match action {
        Action::SetField { field, value } => field.set(&mut state, value),
        Action::SetStatus(status) => state.status = status,
        Action::AddItem => {
            let id = fresh_item_id(&state.items);
            state.items.push(InvoiceItem::blank(id));
        }
        Action::UpdateItem { id, change } => {
            if let Some(item) = state.items.iter_mut().find(|i| i.id == id) {
                apply_change(item, change);
            }
        }
        Action::RemoveItem { id } => state.items.retain(|i| i.id != id),
    }
    state
}

fn apply_change(item: &mut InvoiceItem, change: ItemChange) {
    match change {
        ItemChange::Description(d) => item.description = d,
        ItemChange::Quantity(q) => {
            item.quantity = q;
            item.amount = item.quantity * item.rate;
        }
        ItemChange::Rate(r) => {
            item.rate = r;
            item.amount = item.quantity * item.rate;
        }
    }
}

/// Smallest positive integer id not already used by an item.
pub fn fresh_item_id(items: &[InvoiceItem]) -> String {
    (1u64..)
        .map(|n| n.to_string())
        .find(|candidate| items.iter().all(|i| &i.id != candidate))
        .unwrap_or_default()
}

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("static regex")
});

/// Lenient numeric input: takes the leading number of the text, like a
/// browser number field would, and falls back to zero.
pub fn parse_number(raw: &str) -> f64 {
    LEADING_NUMBER
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn seed() -> InvoiceData {
        InvoiceData::seed(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
    }

    #[test]
    fn add_item_appends_blank_row_with_fresh_id() {
        let state = reduce(seed(), Action::AddItem);
        let added = state.items.last().unwrap();
        assert_eq!(added.id, "3");
        assert_eq!(added.description, "");
        assert_eq!((added.quantity, added.rate, added.amount), (0.0, 0.0, 0.0));
    }

    #[test]
    fn fresh_id_fills_gaps() {
        let items = vec![InvoiceItem::blank("2"), InvoiceItem::blank("x")];
        assert_eq!(fresh_item_id(&items), "1");
    }

    #[test]
    fn quantity_update_recomputes_amount() {
        let state = reduce(
            seed(),
            Action::UpdateItem {
                id: "1".into(),
                change: ItemChange::Quantity(3.0),
            },
        );
        let item = state.item("1").unwrap();
        assert_eq!(item.amount, 7500.0);
        assert_eq!(state.totals().subtotal, 12500.0);
    }

    #[test]
    fn description_update_leaves_amount() {
        let state = reduce(
            seed(),
            Action::UpdateItem {
                id: "2".into(),
                change: ItemChange::Description("ML".into()),
            },
        );
        assert_eq!(state.item("2").unwrap().amount, 5000.0);
    }

    #[test]
    fn unknown_item_id_is_a_no_op() {
        let before = seed();
        let after = reduce(
            before.clone(),
            Action::UpdateItem {
                id: "nope".into(),
                change: ItemChange::Rate(1.0),
            },
        );
        assert_eq!(before, after);
    }

    #[test]
    fn empty_payment_link_clears_it() {
        let state = reduce(
            seed(),
            Action::SetField {
                field: InvoiceField::PaymentLink,
                value: "https://pay.example/1".into(),
            },
        );
        assert_eq!(state.payment_link.as_deref(), Some("https://pay.example/1"));
        let state = reduce(
            state,
            Action::SetField {
                field: InvoiceField::PaymentLink,
                value: "  ".into(),
            },
        );
        assert_eq!(state.payment_link, None);
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("bill_to_city".parse::<InvoiceField>().unwrap(), InvoiceField::BillToCity);
        assert_eq!("Due-Date".parse::<InvoiceField>().unwrap(), InvoiceField::DueDate);
        assert!("colour".parse::<InvoiceField>().is_err());
    }

    #[test]
    fn numeric_input_falls_back_to_zero() {
        assert_eq!(parse_number("12.5"), 12.5);
        assert_eq!(parse_number("  3abc"), 3.0);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("1e999"), 0.0);
    }

    #[test]
    fn item_change_parses_numeric_fields_leniently() {
        assert_eq!(ItemChange::parse("qty", "x").unwrap(), ItemChange::Quantity(0.0));
        assert_eq!(ItemChange::parse("rate", "100").unwrap(), ItemChange::Rate(100.0));
        assert!(ItemChange::parse("amount", "5").is_err());
    }
}
