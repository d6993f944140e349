//! Interactive editing session driven by terminal prompts.

use chrono::{Local, NaiveDate};
use inquire::{Confirm, DateSelect, Select, Text};

use crate::editor::Editor;
use crate::error::Result;
use crate::format::{CURRENCY_NAMES, format_currency};
use crate::model::{DATE_FORMAT, InvoiceStatus};
use crate::reducer::{Action, InvoiceField, ItemChange, parse_number};
use crate::snapshot::SnapshotStore;
use crate::table::{header_table, items_table};

const EDIT_FIELD_OPT: &str = "✏️  Edit a field";
const STATUS_OPT: &str = "🏷️  Set status";
const ADD_ITEM_OPT: &str = "➕ Add item";
const EDIT_ITEM_OPT: &str = "📝 Edit item";
const REMOVE_ITEM_OPT: &str = "🗑️  Remove item";
const SHOW_OPT: &str = "📋 Show invoice";
const PREVIEW_OPT: &str = "👁️  Preview & Print Invoice";
const QUIT_OPT: &str = "🚪 Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    Preview,
    Quit,
}

pub fn run<S: SnapshotStore>(editor: &mut Editor<S>) -> Result<SessionExit> {
    println!("\n--- Invoice Generator ---");
    println!("💡 Every change is saved immediately.");

    loop {
        let options = vec![
            EDIT_FIELD_OPT,
            STATUS_OPT,
            ADD_ITEM_OPT,
            EDIT_ITEM_OPT,
            REMOVE_ITEM_OPT,
            SHOW_OPT,
            PREVIEW_OPT,
            QUIT_OPT,
        ];
        let totals = editor.totals();
        let prompt = format!(
            "Invoice #{} | Amount Due {}:",
            editor.state().invoice_number,
            format_currency(totals.amount_due, &editor.state().currency)
        );

        match Select::new(&prompt, options).prompt()? {
            EDIT_FIELD_OPT => edit_field(editor)?,
            STATUS_OPT => {
                let status = Select::new("Status:", InvoiceStatus::ALL.to_vec()).prompt()?;
                editor.dispatch(Action::SetStatus(status))?;
            }
            ADD_ITEM_OPT => {
                let item = editor.add_item()?;
                println!("✅ Added item {}", item.id);
                edit_item(editor, &item.id)?;
            }
            EDIT_ITEM_OPT => {
                if let Some(id) = pick_item(editor, "Select item to edit:")? {
                    edit_item(editor, &id)?;
                }
            }
            REMOVE_ITEM_OPT => {
                if let Some(id) = pick_item(editor, "Select item to remove:")? {
                    editor.dispatch(Action::RemoveItem { id })?;
                }
            }
            SHOW_OPT => {
                println!("{}", header_table(editor.state()));
                println!("{}", items_table(editor.state()));
            }
            PREVIEW_OPT => return Ok(SessionExit::Preview),
            _ => return Ok(SessionExit::Quit),
        }
    }
}

fn edit_field<S: SnapshotStore>(editor: &mut Editor<S>) -> Result<()> {
    let labels: Vec<&str> = InvoiceField::ALL.iter().map(|f| f.label()).collect();
    let choice = Select::new("Field:", labels).with_page_size(10).prompt()?;
    let Some(field) = InvoiceField::ALL.into_iter().find(|f| f.label() == choice) else {
        return Ok(());
    };

    let current = field.get(editor.state());
    let value = match field {
        InvoiceField::InvoiceDate | InvoiceField::DueDate => {
            let default = NaiveDate::parse_from_str(&current, DATE_FORMAT)
                .unwrap_or_else(|_| Local::now().date_naive());
            DateSelect::new(field.label())
                .with_default(default)
                .prompt()?
                .format(DATE_FORMAT)
                .to_string()
        }
        InvoiceField::Currency => {
            let options: Vec<String> = CURRENCY_NAMES
                .iter()
                .map(|(code, name)| format!("{name} ({code})"))
                .collect();
            let picked = Select::new("Currency:", options).prompt()?;
            CURRENCY_NAMES
                .iter()
                .find(|(code, _)| picked.ends_with(&format!("({code})")))
                .map(|(code, _)| code.to_string())
                .unwrap_or(current)
        }
        InvoiceField::Notes | InvoiceField::Terms => {
            println!("💡 Tip: Use '\\n' for new lines.");
            Text::new(field.label())
                .with_default(&current.replace('\n', "\\n"))
                .prompt()?
                .replace("\\n", "\n")
        }
        _ => Text::new(field.label()).with_default(&current).prompt()?,
    };

    editor.dispatch(Action::SetField { field, value })?;
    Ok(())
}

fn pick_item<S: SnapshotStore>(editor: &Editor<S>, prompt: &str) -> Result<Option<String>> {
    let items = &editor.state().items;
    if items.is_empty() {
        println!("❌ No items yet.");
        return Ok(None);
    }

    let options: Vec<String> = items
        .iter()
        .map(|i| format!("{} | {} × {}", i.id, display_description(&i.description), i.rate))
        .collect();
    let choice = Select::new(prompt, options).prompt()?;
    Ok(choice.split(" | ").next().map(str::to_string))
}

fn edit_item<S: SnapshotStore>(editor: &mut Editor<S>, id: &str) -> Result<()> {
    let Some(item) = editor.state().item(id).cloned() else {
        return Ok(());
    };

    let description = Text::new("Description:").with_default(&item.description).prompt()?;
    let quantity = Text::new("Qty:").with_default(&item.quantity.to_string()).prompt()?;
    let rate = Text::new("Rate:").with_default(&item.rate.to_string()).prompt()?;

    for change in [
        ItemChange::Description(description),
        ItemChange::Quantity(parse_number(&quantity)),
        ItemChange::Rate(parse_number(&rate)),
    ] {
        editor.dispatch(Action::UpdateItem {
            id: id.to_string(),
            change,
        })?;
    }

    if let Some(updated) = editor.state().item(id) {
        println!(
            "✅ {} = {}",
            display_description(&updated.description),
            format_currency(updated.amount, &editor.state().currency)
        );
    }

    if editor.state().items.len() > 1
        && Confirm::new("Show all items?").with_default(false).prompt()?
    {
        println!("{}", items_table(editor.state()));
    }
    Ok(())
}

fn display_description(description: &str) -> &str {
    if description.trim().is_empty() { "(no description)" } else { description }
}
