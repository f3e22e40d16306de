//! History persistence for accepted updates
//!
//! Per `(partition key, verifier id)` pair the pipeline keeps the ordered
//! record of previously accepted, unambiguous updates. The container is
//! host-owned and durable across the host's checkpoint/restore cycle; the
//! pipeline treats it as opaque: load, append, clear, nothing else.
//! Insertion order is the chronological order of acceptance and must be
//! preserved by implementations.
//!
//! `InMemoryHistoryStore` is the bundled implementation for tests and
//! embedded use. Entries round-trip through the bincode serializer on every
//! append and load, so nothing can accidentally rely on in-memory sharing:
//! it behaves observably like a store that went to disk.

use crate::timestamped::TimestampedValue;
use parking_lot::RwLock;
use std::collections::HashMap;
use vigil_core::Result;

/// Ordered, appendable, clearable record of accepted updates
///
/// Keyed by `(partition key, verifier id)`. Implementations must be
/// `Send + Sync`; per-pair call ordering is the pipeline's responsibility
/// (updates for one key are strictly sequential).
pub trait HistoryStore: Send + Sync {
    /// Materialize the current history, oldest first
    ///
    /// An unknown pair loads as empty.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures unchanged.
    fn load(&self, key: &str, verifier_id: &str) -> Result<Vec<TimestampedValue>>;

    /// Append one accepted update at the end
    ///
    /// # Errors
    ///
    /// Propagates persistence failures unchanged.
    fn append(&self, key: &str, verifier_id: &str, entry: &TimestampedValue) -> Result<()>;

    /// Clear the pair's history to empty
    ///
    /// # Errors
    ///
    /// Propagates persistence failures unchanged.
    fn clear(&self, key: &str, verifier_id: &str) -> Result<()>;
}

/// In-memory history store with serializer round-tripping
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    entries: RwLock<HashMap<(String, String), Vec<Vec<u8>>>>,
}

impl InMemoryHistoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn pair_key(key: &str, verifier_id: &str) -> (String, String) {
        (key.to_string(), verifier_id.to_string())
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn load(&self, key: &str, verifier_id: &str) -> Result<Vec<TimestampedValue>> {
        let entries = self.entries.read();
        match entries.get(&Self::pair_key(key, verifier_id)) {
            Some(encoded) => encoded
                .iter()
                .map(|bytes| TimestampedValue::decode(bytes))
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    fn append(&self, key: &str, verifier_id: &str, entry: &TimestampedValue) -> Result<()> {
        let encoded = entry.encode()?;
        let mut entries = self.entries.write();
        entries
            .entry(Self::pair_key(key, verifier_id))
            .or_default()
            .push(encoded);
        Ok(())
    }

    fn clear(&self, key: &str, verifier_id: &str) -> Result<()> {
        let mut entries = self.entries.write();
        entries.remove(&Self::pair_key(key, verifier_id));
        Ok(())
    }
}
