use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{DocumentStore, StoreError};

// ============================================================================
// Transaction - snapshot reads, staged writes
// ============================================================================

pub(crate) enum StagedWrite {
    Set {
        collection: String,
        id: String,
        value: serde_json::Value,
    },
    Delete {
        collection: String,
        id: String,
    },
}

/// A transaction-scoped read/write handle.
///
/// Reads observe committed state, except that a document this transaction
/// has already staged a write for reads back the staged value. The version
/// recorded in the read set is always the committed one: it is what commit
/// validation compares against.
pub struct Transaction<'a> {
    store: &'a DocumentStore,
    reads: Vec<((String, String), u64)>,
    writes: Vec<StagedWrite>,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(store: &'a DocumentStore) -> Self {
        Self {
            store,
            reads: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// Read a document within the transaction.
    pub fn get<T: DeserializeOwned>(
        &mut self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        self.record_read(collection, id);

        if let Some(staged) = self.staged_value(collection, id) {
            return match staged {
                Some(value) => Ok(Some(serde_json::from_value(value)?)),
                None => Ok(None), // staged delete
            };
        }

        match self.store.committed_value(collection, id) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Stage an insert-or-replace of a document.
    pub fn set<T: Serialize>(
        &mut self,
        collection: &str,
        id: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        self.writes.push(StagedWrite::Set {
            collection: collection.to_string(),
            id: id.to_string(),
            value: serde_json::to_value(value)?,
        });
        Ok(())
    }

    /// Stage a delete of a document.
    pub fn delete(&mut self, collection: &str, id: &str) {
        self.writes.push(StagedWrite::Delete {
            collection: collection.to_string(),
            id: id.to_string(),
        });
    }

    pub(crate) fn into_parts(self) -> (Vec<((String, String), u64)>, Vec<StagedWrite>) {
        (self.reads, self.writes)
    }

    /// Record the committed version of a document the first time it is read.
    fn record_read(&mut self, collection: &str, id: &str) {
        let key = (collection.to_string(), id.to_string());
        if self.reads.iter().any(|(k, _)| *k == key) {
            return;
        }
        let version = self.store.committed_version(collection, id);
        self.reads.push((key, version));
    }

    /// Latest staged write for a document, if any. `Some(None)` means the
    /// latest staged operation was a delete.
    #[allow(clippy::option_option)]
    fn staged_value(&self, collection: &str, id: &str) -> Option<Option<serde_json::Value>> {
        self.writes.iter().rev().find_map(|write| match write {
            StagedWrite::Set {
                collection: c,
                id: i,
                value,
            } if c == collection && i == id => Some(Some(value.clone())),
            StagedWrite::Delete {
                collection: c,
                id: i,
            } if c == collection && i == id => Some(None),
            _ => None,
        })
    }
}
