//! Read-only rendering of the stored invoice.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};
use tracing::{info, warn};

use crate::config::AppSettings;
use crate::error::{InvoiceError, Result};
use crate::format::{StatusStyle, format_currency, format_date};
use crate::model::{BillTo, Company, InvoiceData};
use crate::snapshot::SnapshotStore;

pub const TEMPLATE_NAME: &str = "invoice.html";

// Embed template at compile time to ensure availability
const DEFAULT_TEMPLATE: &str = include_str!("../templates/invoice.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Editor,
    Preview,
}

/// What the user ends up looking at after navigating.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Editor,
    Preview(Preview),
}

/// Resolves a route. The preview reads the snapshot exactly once; with no
/// snapshot it quietly sends the user back to the editor.
pub fn navigate<S: SnapshotStore>(route: Route, store: &S) -> Result<Screen> {
    match route {
        Route::Editor => Ok(Screen::Editor),
        Route::Preview => match store.load()? {
            Some(data) => Ok(Screen::Preview(Preview::new(data))),
            None => {
                warn!("no invoice snapshot, redirecting to editor");
                Ok(Screen::Editor)
            }
        },
    }
}

/// Renders the stored invoice, or `None` when navigation redirected to the
/// editor because nothing has been saved yet.
pub fn render_snapshot<S: SnapshotStore>(
    store: &S,
    renderer: &Renderer,
    settings: &AppSettings,
    auto_print: bool,
) -> Result<Option<String>> {
    match navigate(Route::Preview, store)? {
        Screen::Preview(preview) => preview.render(renderer, settings, auto_print).map(Some),
        Screen::Editor => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    data: InvoiceData,
}

#[derive(Debug, Serialize)]
pub struct PreviewRow {
    pub index: usize,
    pub description: String,
    pub quantity: String,
    pub rate: String,
    pub amount: String,
}

/// Everything the template needs, already formatted.
#[derive(Debug, Serialize)]
pub struct PreviewContext {
    pub title: String,
    pub company: Company,
    pub logo: Option<String>,
    pub tagline: Option<String>,
    pub invoice_number: String,
    pub status: String,
    pub status_class: &'static str,
    pub invoice_date: String,
    pub due_date: String,
    pub bill_to: BillTo,
    pub items: Vec<PreviewRow>,
    pub subtotal: String,
    pub total: String,
    pub amount_due: String,
    pub note: String,
    pub terms: Option<String>,
    pub payment_link: Option<String>,
    pub auto_print: bool,
}

impl Preview {
    pub fn new(data: InvoiceData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &InvoiceData {
        &self.data
    }

    pub fn title(&self) -> String {
        format!("Invoice {}", self.data.invoice_number)
    }

    pub fn context(&self, settings: &AppSettings, auto_print: bool) -> PreviewContext {
        let data = &self.data;
        let money = |amount: f64| format_currency(amount, &data.currency);
        let totals = data.totals();

        let items = data
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| PreviewRow {
                index: i + 1,
                description: item.description.clone(),
                quantity: item.quantity.to_string(),
                rate: money(item.rate),
                amount: money(item.amount),
            })
            .collect();

        PreviewContext {
            title: self.title(),
            company: data.company.clone(),
            logo: data.company.logo.clone(),
            tagline: settings.tagline.clone(),
            invoice_number: data.invoice_number.clone(),
            status: data.status.to_string(),
            status_class: StatusStyle::for_status(data.status).css_class(),
            invoice_date: format_date(&data.invoice_date),
            due_date: format_date(&data.due_date),
            bill_to: data.bill_to.clone(),
            items,
            subtotal: money(totals.subtotal),
            total: money(totals.total),
            amount_due: money(totals.amount_due),
            note: combined_note(&data.notes, settings.payment_info.as_deref()),
            terms: (!data.terms.trim().is_empty()).then(|| data.terms.clone()),
            payment_link: data.payment_link.clone(),
            auto_print,
        }
    }

    pub fn render(
        &self,
        renderer: &Renderer,
        settings: &AppSettings,
        auto_print: bool,
    ) -> Result<String> {
        let context = Context::from_serialize(self.context(settings, auto_print))?;
        let html = renderer.tera.render(TEMPLATE_NAME, &context)?;
        info!(invoice = %self.data.invoice_number, bytes = html.len(), "preview rendered");
        Ok(html)
    }
}

/// Invoice notes followed by the standing payment instructions.
pub fn combined_note(notes: &str, payment_info: Option<&str>) -> String {
    match (notes.trim().is_empty(), payment_info) {
        (false, Some(info)) => format!("{notes}\n\n{info}"),
        (false, None) => notes.to_string(),
        (true, Some(info)) => info.to_string(),
        (true, None) => String::new(),
    }
}

pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Uses only the template compiled into the binary.
    pub fn embedded() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, DEFAULT_TEMPLATE)?;
        Ok(Self { tera })
    }

    /// Loads templates from `template_dir`, writing the default one there
    /// first if the user has not provided their own.
    pub fn from_dir(template_dir: &Path) -> Result<Self> {
        fs::create_dir_all(template_dir).map_err(|e| InvoiceError::io(template_dir, e))?;
        let template_path = template_dir.join(TEMPLATE_NAME);
        if !template_path.exists() {
            info!(path = %template_path.display(), "initializing default template");
            fs::write(&template_path, DEFAULT_TEMPLATE)
                .map_err(|e| InvoiceError::io(&template_path, e))?;
        }

        let glob = template_dir.join("*.html");
        let tera = Tera::new(&glob.to_string_lossy())?;
        Ok(Self { tera })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_combinations() {
        assert_eq!(combined_note("Thanks", Some("Bank: X")), "Thanks\n\nBank: X");
        assert_eq!(combined_note("Thanks", None), "Thanks");
        assert_eq!(combined_note("", Some("Bank: X")), "Bank: X");
        assert_eq!(combined_note("  ", None), "");
    }
}
