//! Update events
//!
//! One `UpdateEvent` carries one raw update payload per verifier for a single
//! partition key. The ingestion pipeline that produces these events is a host
//! concern; the verifier only consumes an ordered stream of them, one key at
//! a time.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One incoming update for a partition key
///
/// `updates` maps a verifier id to the raw payload that verifier should apply
/// this round. A payload is opaque to the pipeline; only the verifier that
/// owns the id interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEvent {
    /// Partition key this event belongs to
    pub key: String,
    /// Raw update payload per verifier id
    pub updates: BTreeMap<String, Value>,
}

impl UpdateEvent {
    /// Create an empty event for a key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            updates: BTreeMap::new(),
        }
    }

    /// Add a payload for a verifier id, builder-style
    pub fn with_update(mut self, verifier_id: impl Into<String>, payload: Value) -> Self {
        self.updates.insert(verifier_id.into(), payload);
        self
    }

    /// Look up the payload for a verifier id
    pub fn update_for(&self, verifier_id: &str) -> Option<&Value> {
        self.updates.get(verifier_id)
    }

    /// Number of per-verifier payloads in this event
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Check whether the event carries no payloads
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}
