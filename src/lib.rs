pub mod config;
pub mod editor;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod preview;
pub mod print;
pub mod reducer;
pub mod session;
pub mod snapshot;
pub mod table;

pub use editor::Editor;
pub use error::{InvoiceError, Result};
pub use model::{InvoiceData, InvoiceItem, InvoiceStatus, Totals};
pub use reducer::{Action, InvoiceField, ItemChange, reduce};
pub use snapshot::{FileStore, MemoryStore, SnapshotStore};
