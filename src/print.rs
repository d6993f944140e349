use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use slug::slugify;
use tracing::info;

use crate::error::{InvoiceError, Result};

/// Hands a rendered document to whatever prints it. Nothing is tracked after
/// the hand-off.
pub trait PrintHost {
    /// `invoice_number` names the document; the host decides where it goes.
    fn print(&self, invoice_number: &str, html: &str) -> Result<PathBuf>;
}

/// Writes the document next to the other outputs and opens it in the default
/// browser, whose print dialog takes over from there.
pub struct BrowserPrint {
    output_dir: PathBuf,
    open: bool,
}

impl BrowserPrint {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            open: true,
        }
    }

    /// Only write the file; used when no desktop is around.
    pub fn without_opening(mut self) -> Self {
        self.open = false;
        self
    }

    /// `<output_dir>/<slug-of-invoice-number>.html`
    pub fn document_path(&self, invoice_number: &str) -> PathBuf {
        let stem = slugify(invoice_number);
        let stem = if stem.is_empty() { "invoice".to_string() } else { stem };
        self.output_dir.join(format!("{stem}.html"))
    }
}

impl PrintHost for BrowserPrint {
    fn print(&self, invoice_number: &str, html: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| InvoiceError::io(&self.output_dir, e))?;
        let path = self.document_path(invoice_number);
        fs::write(&path, html).map_err(|e| InvoiceError::io(&path, e))?;
        info!(path = %path.display(), "document ready for printing");

        if self.open {
            open_in_browser(&path);
        }
        Ok(path)
    }
}

// Fire and forget: a missing opener is not our problem.
fn open_in_browser(path: &Path) {
    #[cfg(target_os = "macos")]
    Command::new("open").arg(path).spawn().ok();

    #[cfg(target_os = "windows")]
    Command::new("explorer").arg(path).spawn().ok();

    #[cfg(target_os = "linux")]
    Command::new("xdg-open").arg(path).spawn().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_named_after_invoice() {
        let host = BrowserPrint::new("/out");
        assert_eq!(
            host.document_path("INV-001727"),
            PathBuf::from("/out/inv-001727.html")
        );
        assert_eq!(host.document_path("***"), PathBuf::from("/out/invoice.html"));
    }

    #[test]
    fn writes_document_without_opening() {
        let dir = tempfile::tempdir().unwrap();
        let host = BrowserPrint::new(dir.path()).without_opening();
        let path = host.print("INV-7", "<p>hi</p>").unwrap();
        assert!(path.ends_with("inv-7.html"));
        assert_eq!(fs::read_to_string(path).unwrap(), "<p>hi</p>");
    }
}
