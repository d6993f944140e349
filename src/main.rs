use chrono::Local;
use clap::{CommandFactory, Parser, Subcommand};

use invoice_generator::config::{AppSettings, get_config_path, load_settings, setup_config_wizard};
use invoice_generator::error::{InvoiceError, Result};
use invoice_generator::logging::init_tracing;
use invoice_generator::preview::{Preview, Renderer, Route, Screen, navigate, render_snapshot};
use invoice_generator::print::{BrowserPrint, PrintHost};
use invoice_generator::session::{self, SessionExit};
use invoice_generator::table::{header_table, items_table};
use invoice_generator::snapshot::load_or_seed;
use invoice_generator::{
    Action, Editor, FileStore, InvoiceData, InvoiceField, InvoiceStatus, ItemChange,
    SnapshotStore,
};

#[derive(Parser)]
#[command(
    name = "invoice-generator",
    about = "Create professional invoices and receipts with ease"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit the invoice interactively
    Edit,
    /// Set one invoice field (e.g. `set bill-to-name "Acme Ltd"`)
    Set { field: String, value: String },
    /// Set the payment status (paid, unpaid, overdue)
    Status { status: String },
    /// Add, update or remove line items
    Item {
        #[command(subcommand)]
        command: ItemCommand,
    },
    /// Show the invoice and its totals
    Show,
    /// Render the preview and open it in the browser
    Preview {
        /// Open the print dialog as soon as the preview loads
        #[arg(long)]
        print: bool,
        /// Write the document without opening it
        #[arg(long)]
        no_open: bool,
        /// Write the rendered HTML to stdout instead
        #[arg(long, conflicts_with_all = ["print", "no_open"])]
        stdout: bool,
    },
    /// Start over from the default invoice
    Reset,
    /// Configure data directory and payment instructions
    Config {
        /// Print the current settings instead of editing them
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
enum ItemCommand {
    /// Append a blank item
    Add,
    /// Change description, qty or rate of an item
    Update { id: String, field: String, value: String },
    /// Remove an item
    Remove { id: String },
}

fn main() {
    init_tracing("warn");
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help().ok();
        return;
    };

    if let Err(e) = run(command) {
        match e {
            InvoiceError::Prompt(_) => println!("Cancelled"),
            e => {
                eprintln!("❌ Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn run(command: Commands) -> Result<()> {
    let config_path = get_config_path();
    if let Commands::Config { show } = command {
        if show {
            let settings = load_settings(&config_path)?;
            println!("📄 {}", config_path.display());
            println!("{}", toml::to_string_pretty(&settings)?);
        } else {
            setup_config_wizard(&config_path)?;
        }
        return Ok(());
    }

    let settings = load_settings(&config_path)?;
    let store = FileStore::new(settings.data_dir());
    let seed = InvoiceData::seed(Local::now().date_naive());

    match command {
        Commands::Edit => edit(&settings, store, seed)?,
        Commands::Set { field, value } => {
            let field: InvoiceField = field.parse()?;
            let mut editor = Editor::resume(store, seed)?;
            editor.dispatch(Action::SetField { field, value })?;
            println!("✅ {} = {}", field, field.get(editor.state()));
        }
        Commands::Status { status } => {
            let status: InvoiceStatus = status.parse()?;
            let mut editor = Editor::resume(store, seed)?;
            editor.dispatch(Action::SetStatus(status))?;
            println!("✅ Status: {status}");
        }
        Commands::Item { command } => {
            let mut editor = Editor::resume(store, seed)?;
            run_item_command(&mut editor, command)?;
            println!("{}", items_table(editor.state()));
        }
        Commands::Show => {
            let data = load_or_seed(&store, seed)?;
            println!("{}", header_table(&data));
            println!("{}", items_table(&data));
        }
        Commands::Preview { print, no_open, stdout } => {
            if stdout {
                let renderer = Renderer::from_dir(&settings.template_dir())?;
                match render_snapshot(&store, &renderer, &settings, false)? {
                    Some(html) => println!("{html}"),
                    None => eprintln!("❌ No invoice yet. Run `invoice-generator edit` first."),
                }
            } else if !show_preview(&settings, &store, print, !no_open)? {
                edit(&settings, store, seed)?;
            }
        }
        Commands::Reset => {
            Editor::new(store, seed)?;
            println!("♻️  Invoice reset to defaults.");
        }
        Commands::Config { .. } => {}
    }
    Ok(())
}

fn edit(settings: &AppSettings, store: FileStore, seed: InvoiceData) -> Result<()> {
    let mut editor = Editor::resume(store, seed)?;
    if session::run(&mut editor)? == SessionExit::Preview {
        show_preview(settings, editor.store(), true, true)?;
    }
    Ok(())
}

fn run_item_command<S: SnapshotStore>(
    editor: &mut Editor<S>,
    command: ItemCommand,
) -> Result<()> {
    match command {
        ItemCommand::Add => {
            let item = editor.add_item()?;
            println!("✅ Added item {}", item.id);
        }
        ItemCommand::Update { id, field, value } => {
            let change = ItemChange::parse(&field, &value)?;
            if editor.state().item(&id).is_none() {
                return Err(InvoiceError::ItemNotFound(id));
            }
            editor.dispatch(Action::UpdateItem { id, change })?;
        }
        ItemCommand::Remove { id } => {
            if editor.state().item(&id).is_none() {
                return Err(InvoiceError::ItemNotFound(id));
            }
            editor.dispatch(Action::RemoveItem { id })?;
        }
    }
    Ok(())
}

/// `None` means the user was sent back to the editor.
fn load_preview<S: SnapshotStore>(store: &S) -> Result<Option<Preview>> {
    match navigate(Route::Preview, store)? {
        Screen::Preview(preview) => Ok(Some(preview)),
        Screen::Editor => Ok(None),
    }
}

/// Returns `false` when there was nothing to preview.
fn show_preview<S: SnapshotStore>(
    settings: &AppSettings,
    store: &S,
    auto_print: bool,
    open: bool,
) -> Result<bool> {
    let Some(preview) = load_preview(store)? else {
        return Ok(false);
    };

    let renderer = Renderer::from_dir(&settings.template_dir())?;
    let html = preview.render(&renderer, settings, auto_print)?;

    let host = BrowserPrint::new(settings.output_dir());
    let host = if open { host } else { host.without_opening() };
    let path = host.print(&preview.data().invoice_number, &html)?;
    println!("✅ Preview written: {}", path.display());
    Ok(true)
}
