//! Collaborator interfaces for the store under verification
//!
//! Vigil never implements a TTL store. The host hands it a [`StateBackend`]
//! that can create (or restore, across the host's checkpoint lifecycle) one
//! TTL-governed state handle per `(partition key, verifier)` pair; the
//! pipeline drives that handle through its own API and judges what it
//! observes.
//!
//! # Contract
//!
//! - `read` returns the currently visible value. Absent or fully expired
//!   state reads as the shape's empty value: `Null` for [`StateShape::Value`]
//!   and [`StateShape::Aggregate`], `Array([])` for [`StateShape::List`],
//!   `Object({})` for [`StateShape::Map`].
//! - `apply` performs the shape's native update operation exactly once:
//!   replace, append, put-entry, or add.
//! - `clear` drops the state to empty, as if never written.
//! - All three are synchronous, blocking calls. Failures propagate unchanged.

use std::time::Duration;
use vigil_core::{Result, Value};

/// The state primitive a verifier exercises
///
/// Each shape carries its own update operation and its own expiry
/// granularity: a `Value` is replaced wholesale, `List` elements and `Map`
/// entries expire individually, an `Aggregate` lives and dies as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum StateShape {
    /// Single value; update replaces it
    Value,
    /// Ordered list; update appends one element
    List,
    /// Keyed entries; update is an `Object {"key", "value"}` put
    Map,
    /// Single accumulator; update is an `Int` added to it
    Aggregate,
}

impl StateShape {
    /// The value an empty state of this shape reads as
    pub fn empty_value(&self) -> Value {
        match self {
            StateShape::Value | StateShape::Aggregate => Value::Null,
            StateShape::List => Value::Array(Vec::new()),
            StateShape::Map => Value::Object(Default::default()),
        }
    }
}

impl std::fmt::Display for StateShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StateShape::Value => "value",
            StateShape::List => "list",
            StateShape::Map => "map",
            StateShape::Aggregate => "aggregate",
        };
        write!(f, "{}", name)
    }
}

/// Everything the host needs to create or restore one state handle
#[derive(Debug, Clone)]
pub struct StateDescriptor {
    /// Partition key the handle is scoped to
    pub key: String,
    /// State name, unique per verifier (used by the host for addressing)
    pub name: String,
    /// Which primitive to create
    pub shape: StateShape,
    /// TTL the store must enforce on this state
    pub ttl: Duration,
}

impl StateDescriptor {
    /// Create a descriptor
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        shape: StateShape,
        ttl: Duration,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            shape,
            ttl,
        }
    }
}

/// One TTL-governed state handle, externally owned
///
/// The pipeline is the only writer for a given `(key, verifier)` pair, so
/// handles are driven through `&mut self` and need no internal
/// synchronization.
pub trait TtlStateHandle {
    /// Read the currently visible value
    ///
    /// # Errors
    ///
    /// Propagates any failure from the underlying store unchanged.
    fn read(&mut self) -> Result<Value>;

    /// Apply one raw update with the shape's native operation
    ///
    /// # Errors
    ///
    /// Propagates any failure from the underlying store unchanged.
    fn apply(&mut self, update: &Value) -> Result<()>;

    /// Clear the state to empty
    ///
    /// # Errors
    ///
    /// Propagates any failure from the underlying store unchanged.
    fn clear(&mut self) -> Result<()>;
}

/// Factory for TTL-governed state handles: the store under verification
///
/// Implementations must be `Send + Sync`; one backend serves every partition
/// key the host routes to this pipeline instance.
pub trait StateBackend: Send + Sync {
    /// Create or restore the handle described by `descriptor`
    ///
    /// Called once per `(key, verifier)` pair per pipeline lifetime; the
    /// handle is cached and reused for every subsequent event.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the underlying store unchanged.
    fn create_state(&self, descriptor: &StateDescriptor) -> Result<Box<dyn TtlStateHandle>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_per_shape() {
        assert_eq!(StateShape::Value.empty_value(), Value::Null);
        assert_eq!(StateShape::Aggregate.empty_value(), Value::Null);
        assert_eq!(StateShape::List.empty_value(), Value::Array(vec![]));
        assert_eq!(
            StateShape::Map.empty_value(),
            Value::Object(Default::default())
        );
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(StateShape::Value.to_string(), "value");
        assert_eq!(StateShape::List.to_string(), "list");
        assert_eq!(StateShape::Map.to_string(), "map");
        assert_eq!(StateShape::Aggregate.to_string(), "aggregate");
    }

    #[test]
    fn test_descriptor_construction() {
        let desc = StateDescriptor::new("k1", "ttl-value", StateShape::Value, Duration::from_millis(100));
        assert_eq!(desc.key, "k1");
        assert_eq!(desc.name, "ttl-value");
        assert_eq!(desc.shape, StateShape::Value);
        assert_eq!(desc.ttl.as_millis(), 100);
    }

    #[test]
    fn test_backend_is_object_safe() {
        fn accepts_backend(_: &dyn StateBackend) {}
        let _ = accepts_backend as fn(&dyn StateBackend);
    }
}
