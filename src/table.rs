use comfy_table::{Attribute, Cell, Color, Table};

use crate::format::{StatusStyle, format_currency, format_date};
use crate::model::InvoiceData;

const GREEN: Color = Color::Rgb { r: 4, g: 120, b: 87 };
const RED: Color = Color::Rgb { r: 185, g: 28, b: 28 };
const AMBER: Color = Color::Rgb { r: 180, g: 83, b: 9 };

/// Items plus derived totals, for the terminal.
pub fn items_table(data: &InvoiceData) -> Table {
    let money = |amount: f64| format_currency(amount, &data.currency);

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("ID"),
        Cell::new("Description"),
        Cell::new("Qty"),
        Cell::new("Rate"),
        Cell::new("Amount"),
    ]);

    for item in &data.items {
        table.add_row(vec![
            Cell::new(&item.id),
            Cell::new(&item.description),
            Cell::new(item.quantity),
            Cell::new(money(item.rate)),
            Cell::new(money(item.amount)),
        ]);
    }

    let totals = data.totals();
    for (label, value) in [
        ("Sub Total", totals.subtotal),
        ("Total", totals.total),
        ("Amount Due", totals.amount_due),
    ] {
        table.add_row(vec![
            Cell::new(""),
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(""),
            Cell::new(""),
            Cell::new(money(value)).add_attribute(Attribute::Bold),
        ]);
    }
    table
}

/// Invoice metadata, with the status coloured the same way the preview badge is.
pub fn header_table(data: &InvoiceData) -> Table {
    let status_color = match StatusStyle::for_status(data.status) {
        StatusStyle::Positive => GREEN,
        StatusStyle::Negative => RED,
        StatusStyle::Neutral => AMBER,
    };

    let mut table = Table::new();
    table.add_row(vec![Cell::new("Invoice"), Cell::new(format!("#{}", data.invoice_number))]);
    table.add_row(vec![
        Cell::new("Status"),
        Cell::new(data.status).fg(status_color).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("From"), Cell::new(&data.company.name)]);
    table.add_row(vec![Cell::new("Bill To"), Cell::new(&data.bill_to.name)]);
    table.add_row(vec![Cell::new("Invoice Date"), Cell::new(format_date(&data.invoice_date))]);
    table.add_row(vec![Cell::new("Due Date"), Cell::new(format_date(&data.due_date))]);
    table.add_row(vec![Cell::new("Currency"), Cell::new(&data.currency)]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn items_table_shows_totals() {
        let data = InvoiceData::seed(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        let rendered = items_table(&data).to_string();
        assert!(rendered.contains("Data Analytics Consultation"));
        assert!(rendered.contains("Amount Due"));
        assert!(rendered.contains("₵7500.00"));
    }

    #[test]
    fn header_table_formats_dates() {
        let data = InvoiceData::seed(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        let rendered = header_table(&data).to_string();
        assert!(rendered.contains("01/05/2024"));
        assert!(rendered.contains("UNPAID"));
    }
}
