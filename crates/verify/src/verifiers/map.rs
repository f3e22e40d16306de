//! Map verifier
//!
//! Drives a keyed-entry map. An update is an `Object {"key", "value"}` put;
//! writing an entry refreshes that entry's TTL only. The visible map before
//! the candidate must hold, for each map key, the newest accepted write to
//! that key (if it survived) and nothing else.

use crate::clash::ClashDetector;
use crate::state::StateShape;
use crate::timestamped::TimestampedValue;
use crate::verifier::{TtlVerifier, VerificationContext};
use rand::RngCore;
use std::collections::BTreeMap;
use vigil_core::Value;

/// Payload field holding the map key
pub const ENTRY_KEY: &str = "key";
/// Payload field holding the entry value
pub const ENTRY_VALUE: &str = "value";

const RANDOM_KEYS: [&str; 4] = ["a", "b", "c", "d"];

/// Verifier for [`StateShape::Map`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MapVerifier;

impl MapVerifier {
    /// Build a put payload
    pub fn entry(key: impl Into<String>, value: Value) -> Value {
        Value::object([
            (ENTRY_KEY, Value::String(key.into())),
            (ENTRY_VALUE, value),
        ])
    }

    /// Split a put payload into its map key and entry value
    fn split(update: &Value) -> Option<(&str, &Value)> {
        let entries = update.as_object()?;
        let key = entries.get(ENTRY_KEY)?.as_str()?;
        let value = entries.get(ENTRY_VALUE)?;
        Some((key, value))
    }
}

impl TtlVerifier for MapVerifier {
    fn id(&self) -> &'static str {
        "map"
    }

    fn shape(&self) -> StateShape {
        StateShape::Map
    }

    fn random_update(&self, rng: &mut dyn RngCore) -> Value {
        let key = RANDOM_KEYS[(rng.next_u32() as usize) % RANDOM_KEYS.len()];
        Self::entry(key, Value::Int((rng.next_u32() % 1_000) as i64))
    }

    fn verify(&self, detector: &ClashDetector, ctx: &VerificationContext) -> bool {
        let cycle = &ctx.update_context;

        // Newest accepted write per map key, in acceptance order
        let mut latest: BTreeMap<&str, &TimestampedValue> = BTreeMap::new();
        for prev in &ctx.prev_updates {
            match Self::split(prev.value()) {
                Some((key, _)) => {
                    latest.insert(key, prev);
                }
                None => return false,
            }
        }

        let mut expected_before: BTreeMap<String, Value> = BTreeMap::new();
        for (key, newest) in latest {
            if !detector.expired_before(newest, cycle.before_ts) {
                match Self::split(newest.value()) {
                    Some((_, value)) => {
                        expected_before.insert(key.to_string(), value.clone());
                    }
                    None => return false,
                }
            }
        }

        let Some((update_key, update_value)) = Self::split(&cycle.update) else {
            return false;
        };
        let mut expected_after = expected_before.clone();
        expected_after.insert(update_key.to_string(), update_value.clone());

        cycle.value_before == Value::Object(expected_before)
            && cycle.value_after == Value::Object(expected_after)
    }
}
