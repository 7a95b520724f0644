mod transaction;

pub use transaction::Transaction;

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

use transaction::StagedWrite;

// ============================================================================
// Document Store - versioned collections with optimistic transactions
// ============================================================================
//
// Named collections of JSON documents keyed by string ids. Every document
// carries a version that increments on each committed write.
//
// Transactions read committed state, record the version of every document
// they touch (0 for absent documents), and stage their writes. Commit takes
// the store's write lock, re-validates the whole read set, and applies the
// staged writes only if no read document changed in the meantime. The commit
// lock is the sole serialization point; no lock is held while transaction
// logic runs.
//
// ============================================================================

pub const PRODUCTS: &str = "products";
pub const ORDERS: &str = "orders";
pub const USERS: &str = "users";

const DEFAULT_MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("transaction conflict: a document in the read set was modified concurrently")]
    Conflict,

    #[error("transaction aborted after {0} conflicting attempts")]
    ConflictExhausted(u32),

    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Outcome of [`DocumentStore::run_transaction`]: either the closure aborted
/// with a business error (zero writes applied, no retry) or the store itself
/// failed.
#[derive(Debug)]
pub enum TxError<E> {
    Aborted(E),
    Store(StoreError),
}

pub(crate) struct VersionedDoc {
    pub(crate) version: u64,
    pub(crate) data: serde_json::Value,
}

type Collections = HashMap<String, HashMap<String, VersionedDoc>>;

pub struct DocumentStore {
    collections: RwLock<Collections>,
    max_attempts: u32,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::with_attempts(DEFAULT_MAX_ATTEMPTS)
    }

    /// `max_attempts` bounds the internal retry loop of `run_transaction`.
    pub fn with_attempts(max_attempts: u32) -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            max_attempts: max_attempts.max(1),
        }
    }

    // ------------------------------------------------------------------
    // Plain (non-transactional) access for single-document CRUD paths
    // ------------------------------------------------------------------

    /// Read one document, deserialized into `T`.
    pub fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        let collections = self.collections.read();
        match collections.get(collection).and_then(|c| c.get(id)) {
            Some(doc) => Ok(Some(serde_json::from_value(doc.data.clone())?)),
            None => Ok(None),
        }
    }

    /// All documents of a collection as `(id, T)` pairs, in no particular
    /// order.
    pub fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<(String, T)>, StoreError> {
        let collections = self.collections.read();
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut out = Vec::with_capacity(docs.len());
        for (id, doc) in docs {
            out.push((id.clone(), serde_json::from_value(doc.data.clone())?));
        }
        Ok(out)
    }

    /// Insert or replace one document outside any transaction.
    pub fn insert<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let data = serde_json::to_value(value)?;
        let mut collections = self.collections.write();
        let docs = collections.entry(collection.to_string()).or_default();
        let version = docs.get(id).map(|d| d.version).unwrap_or(0) + 1;
        docs.insert(id.to_string(), VersionedDoc { version, data });
        Ok(())
    }

    /// Remove one document. Returns whether it existed.
    pub fn remove(&self, collection: &str, id: &str) -> bool {
        let mut collections = self.collections.write();
        collections
            .get_mut(collection)
            .map(|docs| docs.remove(id).is_some())
            .unwrap_or(false)
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// Run `f` against a fresh transaction and commit its staged writes
    /// atomically.
    ///
    /// A commit conflict (some read document was modified by a concurrent
    /// commit) retries `f` with a fresh snapshot, up to the store's attempt
    /// budget. An `Err` from `f` aborts immediately with zero writes applied
    /// and is never retried: business-rule failures are not transient.
    pub fn run_transaction<T, E, F>(&self, mut f: F) -> Result<T, TxError<E>>
    where
        F: FnMut(&mut Transaction<'_>) -> Result<T, E>,
    {
        for attempt in 1..=self.max_attempts {
            let mut tx = Transaction::new(self);
            let out = f(&mut tx).map_err(TxError::Aborted)?;

            match self.commit(tx) {
                Ok(()) => return Ok(out),
                Err(StoreError::Conflict) => {
                    tracing::debug!(attempt, "transaction commit conflict, retrying");
                    continue;
                }
                Err(e) => return Err(TxError::Store(e)),
            }
        }

        Err(TxError::Store(StoreError::ConflictExhausted(
            self.max_attempts,
        )))
    }

    /// Version of a document as currently committed, 0 if absent. Used by
    /// transactions to build their read set.
    pub(crate) fn committed_version(&self, collection: &str, id: &str) -> u64 {
        let collections = self.collections.read();
        collections
            .get(collection)
            .and_then(|c| c.get(id))
            .map(|d| d.version)
            .unwrap_or(0)
    }

    pub(crate) fn committed_value(&self, collection: &str, id: &str) -> Option<serde_json::Value> {
        let collections = self.collections.read();
        collections
            .get(collection)
            .and_then(|c| c.get(id))
            .map(|d| d.data.clone())
    }

    /// Validate the transaction's read set and apply its writes under the
    /// store's write lock.
    fn commit(&self, tx: Transaction<'_>) -> Result<(), StoreError> {
        let (reads, writes) = tx.into_parts();
        let mut collections = self.collections.write();

        for ((collection, id), observed_version) in &reads {
            let current = collections
                .get(collection)
                .and_then(|c| c.get(id))
                .map(|d| d.version)
                .unwrap_or(0);
            if current != *observed_version {
                return Err(StoreError::Conflict);
            }
        }

        for write in writes {
            match write {
                StagedWrite::Set {
                    collection,
                    id,
                    value,
                } => {
                    let docs = collections.entry(collection).or_default();
                    let version = docs.get(&id).map(|d| d.version).unwrap_or(0) + 1;
                    docs.insert(
                        id,
                        VersionedDoc {
                            version,
                            data: value,
                        },
                    );
                }
                StagedWrite::Delete { collection, id } => {
                    if let Some(docs) = collections.get_mut(&collection) {
                        docs.remove(&id);
                    }
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
