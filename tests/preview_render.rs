use chrono::NaiveDate;
use invoice_generator::config::AppSettings;
use invoice_generator::preview::{Preview, Renderer, Route, Screen, navigate, render_snapshot};
use invoice_generator::{InvoiceData, InvoiceItem, InvoiceStatus, MemoryStore, SnapshotStore};

fn seed() -> InvoiceData {
    InvoiceData::seed(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
}

fn settings() -> AppSettings {
    AppSettings {
        payment_info: Some("Payment Type: Bank Transfer".into()),
        ..AppSettings::default()
    }
}

#[test]
fn preview_without_snapshot_redirects_to_editor() {
    let store = MemoryStore::new();
    assert_eq!(navigate(Route::Preview, &store).unwrap(), Screen::Editor);
    assert_eq!(navigate(Route::Editor, &store).unwrap(), Screen::Editor);
}

#[test]
fn preview_reads_the_snapshot() {
    let mut store = MemoryStore::new();
    store.save(&seed()).unwrap();
    match navigate(Route::Preview, &store).unwrap() {
        Screen::Preview(preview) => assert_eq!(preview.data(), &seed()),
        Screen::Editor => panic!("expected a preview"),
    }
}

#[test]
fn context_is_preformatted() {
    let mut data = seed();
    data.status = InvoiceStatus::Paid;
    let ctx = Preview::new(data).context(&settings(), false);

    assert_eq!(ctx.invoice_date, "01/05/2024");
    assert_eq!(ctx.due_date, "01/20/2024");
    assert_eq!(ctx.subtotal, "₵7500.00");
    assert_eq!(ctx.amount_due, "₵7500.00");
    assert_eq!(ctx.status, "PAID");
    assert_eq!(ctx.status_class, "badge badge-paid");
    assert_eq!(ctx.items[1].index, 2);
    assert_eq!(ctx.items[1].quantity, "1");
    assert_eq!(ctx.items[1].rate, "₵5000.00");
    assert!(ctx.note.ends_with("\n\nPayment Type: Bank Transfer"));
}

#[test]
fn rendered_html_contains_invoice() {
    let renderer = Renderer::embedded().unwrap();
    let html = Preview::new(seed()).render(&renderer, &settings(), false).unwrap();

    assert!(html.contains("<title>Invoice INV-001727</title>"));
    assert!(html.contains("Machine Learning Model Development"));
    assert!(html.contains("₵7500.00"));
    assert!(html.contains("Terms &amp; Conditions:"));
    assert!(html.contains("badge badge-unpaid"));
    assert!(!html.contains("window.print()"));
}

#[test]
fn print_hook_and_escaping() {
    let mut data = seed();
    data.bill_to.name = "<Acme & Co>".into();
    data.terms = String::new();
    let renderer = Renderer::embedded().unwrap();
    let html = Preview::new(data).render(&renderer, &settings(), true).unwrap();

    assert!(html.contains("window.print()"));
    assert!(html.contains("&lt;Acme &amp; Co&gt;"));
    assert!(!html.contains("Terms &amp; Conditions:"));
}

#[test]
fn templates_directory_is_initialized() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = Renderer::from_dir(dir.path()).unwrap();
    assert!(dir.path().join("invoice.html").exists());

    let html = Preview::new(seed()).render(&renderer, &settings(), false).unwrap();
    assert!(html.contains("INV-001727"));
}

#[test]
fn empty_invoice_shows_positive_zero_totals() {
    let mut data = seed();
    data.items.clear();
    let ctx = Preview::new(data).context(&settings(), false);
    assert_eq!(ctx.subtotal, "₵0.00");
    assert_eq!(ctx.total, "₵0.00");
    assert_eq!(ctx.amount_due, "₵0.00");
}

#[test]
fn zero_quantity_with_negative_rate_is_not_negative_zero() {
    let mut data = seed();
    data.items = vec![InvoiceItem::new("1", "Credit", 0.0, -50.0)];
    let ctx = Preview::new(data).context(&settings(), false);
    assert_eq!(ctx.items[0].amount, "₵0.00");
    assert_eq!(ctx.subtotal, "₵0.00");
}

#[test]
fn rendering_without_snapshot_yields_nothing() {
    let renderer = Renderer::embedded().unwrap();
    let store = MemoryStore::new();
    assert_eq!(render_snapshot(&store, &renderer, &settings(), false).unwrap(), None);

    let mut store = MemoryStore::new();
    store.save(&seed()).unwrap();
    let html = render_snapshot(&store, &renderer, &settings(), false).unwrap().unwrap();
    assert!(html.contains("INV-001727"));
}
