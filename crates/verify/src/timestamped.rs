//! Timestamped update records
//!
//! A `TimestampedValue` pairs a raw update payload with the two wall-clock
//! readings bracketing the operation that applied it. The exact instant the
//! update became visible to an expiry sweep is unknowable; it is only bounded
//! by `[before_ts, after_ts]`. Every clash decision and every expected-value
//! reconstruction works on these brackets alone.
//!
//! Records are immutable once constructed and serde-serializable; they are
//! what the host's history persistence stores across checkpoint/restore.

use serde::{Deserialize, Serialize};
use vigil_core::{Result, Timestamp, Value};

/// An update payload with the instants bracketing its application
///
/// ## Invariants
///
/// - `before_ts <= after_ts`, enforced at construction
/// - never modified after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampedValue {
    value: Value,
    before_ts: Timestamp,
    after_ts: Timestamp,
}

impl TimestampedValue {
    /// Create a record, validating the window ordering
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if `before_ts > after_ts`; such a window
    /// cannot come from a monotone pair of readings around one operation.
    pub fn new(value: Value, before_ts: Timestamp, after_ts: Timestamp) -> Result<Self> {
        if before_ts > after_ts {
            return Err(vigil_core::Error::InvalidOperation(format!(
                "timestamp window is inverted: {} > {}",
                before_ts, after_ts
            )));
        }
        Ok(Self {
            value,
            before_ts,
            after_ts,
        })
    }

    /// The raw update payload
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Reading taken immediately before the update was applied
    #[inline]
    pub fn before_ts(&self) -> Timestamp {
        self.before_ts
    }

    /// Reading taken immediately after the updated value was re-read
    #[inline]
    pub fn after_ts(&self) -> Timestamp {
        self.after_ts
    }

    /// Width of the observation window in milliseconds
    #[inline]
    pub fn window_millis(&self) -> u64 {
        self.after_ts.millis_since(self.before_ts)
    }

    /// Consume and return the payload
    #[inline]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Encode for the host's history persistence
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a record produced by [`encode`](Self::encode)
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl std::fmt::Display for TimestampedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} @ [{}, {}]",
            self.value, self.before_ts, self.after_ts
        )
    }
}
