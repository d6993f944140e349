//! Hand-off of invoice state from the editor to the preview.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{InvoiceError, Result};
use crate::model::InvoiceData;

/// Key the whole invoice is stored under.
pub const SNAPSHOT_KEY: &str = "invoiceData";

/// Whole-object persistence of the invoice being edited. Every `save`
/// overwrites the previous snapshot.
pub trait SnapshotStore {
    fn save(&mut self, data: &InvoiceData) -> Result<()>;

    /// `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<InvoiceData>>;
}

/// The stored invoice, or `seed` when nothing is stored. Never writes.
pub fn load_or_seed<S: SnapshotStore>(store: &S, seed: InvoiceData) -> Result<InvoiceData> {
    match store.load()? {
        Some(saved) => Ok(saved),
        None => {
            debug!("no snapshot found, starting from seed");
            Ok(seed)
        }
    }
}

/// In-process key-value store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored JSON, if any.
    pub fn raw(&self) -> Option<&str> {
        self.entries.get(SNAPSHOT_KEY).map(String::as_str)
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, data: &InvoiceData) -> Result<()> {
        let json = serde_json::to_string(data)?;
        self.entries.insert(SNAPSHOT_KEY.to_string(), json);
        Ok(())
    }

    fn load(&self) -> Result<Option<InvoiceData>> {
        match self.entries.get(SNAPSHOT_KEY) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }
}

/// Snapshot kept as `<dir>/invoiceData.json`, shared between CLI invocations.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{SNAPSHOT_KEY}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SnapshotStore for FileStore {
    fn save(&mut self, data: &InvoiceData) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| InvoiceError::io(&self.dir, e))?;
        let path = self.path();
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&path, json).map_err(|e| InvoiceError::io(&path, e))?;
        debug!(path = %path.display(), "snapshot written");
        Ok(())
    }

    fn load(&self) -> Result<Option<InvoiceData>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| InvoiceError::io(&path, e))?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_memory_store_loads_nothing() {
        assert_eq!(MemoryStore::new().load().unwrap(), None);
    }

    #[test]
    fn load_or_seed_does_not_write() {
        let store = MemoryStore::new();
        let seed = InvoiceData::seed(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(load_or_seed(&store, seed.clone()).unwrap(), seed);
        assert_eq!(store.raw(), None);
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let mut store = MemoryStore::new();
        let mut data = InvoiceData::seed(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        store.save(&data).unwrap();

        data.invoice_number = "INV-2".into();
        store.save(&data).unwrap();

        assert_eq!(store.load().unwrap().unwrap().invoice_number, "INV-2");
        assert!(store.raw().unwrap().contains("INV-2"));
    }
}
