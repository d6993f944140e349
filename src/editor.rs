use tracing::debug;

use crate::error::{InvoiceError, Result};
use crate::model::{InvoiceData, InvoiceItem, Totals};
use crate::reducer::{Action, reduce};
use crate::snapshot::{SnapshotStore, load_or_seed};

/// The editing screen: owns the in-memory invoice and mirrors it into the
/// snapshot store after every change.
pub struct Editor<S: SnapshotStore> {
    state: InvoiceData,
    store: S,
}

impl<S: SnapshotStore> Editor<S> {
    /// Starts from `initial` and writes it out straight away, so a preview
    /// opened before any edit still finds data.
    pub fn new(mut store: S, initial: InvoiceData) -> Result<Self> {
        store.save(&initial)?;
        Ok(Self {
            state: initial,
            store,
        })
    }

    /// Picks up the stored snapshot if there is one, otherwise `seed`.
    pub fn resume(store: S, seed: InvoiceData) -> Result<Self> {
        let initial = load_or_seed(&store, seed)?;
        Self::new(store, initial)
    }

    pub fn dispatch(&mut self, action: Action) -> Result<&InvoiceData> {
        debug!(?action, "dispatch");
        let next = reduce(self.state.clone(), action);
        self.store.save(&next)?;
        self.state = next;
        Ok(&self.state)
    }

    /// Adds a blank item and returns it.
    pub fn add_item(&mut self) -> Result<InvoiceItem> {
        self.dispatch(Action::AddItem)?;
        self.state
            .items
            .last()
            .cloned()
            .ok_or_else(|| InvoiceError::ItemNotFound("<new>".into()))
    }

    pub fn state(&self) -> &InvoiceData {
        &self.state
    }

    pub fn totals(&self) -> Totals {
        self.state.totals()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
