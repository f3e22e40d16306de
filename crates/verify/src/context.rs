//! Update context: one timestamped read-update-read cycle
//!
//! `build_update_context` is the only place the pipeline mutates the store
//! under verification. It reads the visible value, stamps a reading, applies
//! the raw update, re-reads, and stamps again. The two readings bracket the
//! instant the update became visible to the store's expiry machinery, the
//! tightest bound the outside world can obtain.

use crate::state::TtlStateHandle;
use crate::timestamped::TimestampedValue;
use vigil_core::{Clock, Result, Timestamp, Value};

/// Everything observed during one read-update-read cycle
///
/// Owned transiently by the pipeline for the duration of one evaluation;
/// only the derived [`TimestampedValue`] is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateContext {
    /// Value visible before the update was applied
    pub value_before: Value,
    /// The raw update payload that was applied
    pub update: Value,
    /// Value visible after the update was applied
    pub value_after: Value,
    /// Reading taken before the cycle touched the store
    pub before_ts: Timestamp,
    /// Reading taken after the final re-read
    pub after_ts: Timestamp,
}

impl UpdateContext {
    /// Derive the history record for this cycle: the update payload plus the
    /// window that bracketed its application
    pub fn update_with_ts(&self) -> Result<TimestampedValue> {
        TimestampedValue::new(self.update.clone(), self.before_ts, self.after_ts)
    }
}

impl std::fmt::Display for UpdateContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "before={} update={} after={} window=[{}, {}]",
            self.value_before, self.update, self.value_after, self.before_ts, self.after_ts
        )
    }
}

/// Perform one read-update-read cycle against an externally-owned handle
///
/// The handle is mutated exactly once (by `apply`). Any failure from the
/// underlying read/update capability propagates unchanged.
///
/// # Errors
///
/// Returns the collaborator's error verbatim if any of the three store calls
/// fail.
pub fn build_update_context(
    clock: &dyn Clock,
    state: &mut dyn TtlStateHandle,
    update: &Value,
) -> Result<UpdateContext> {
    let value_before = state.read()?;
    let before_ts = clock.now();
    state.apply(update)?;
    let value_after = state.read()?;
    let after_ts = clock.now();

    Ok(UpdateContext {
        value_before,
        update: update.clone(),
        value_after,
        before_ts,
        after_ts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::{Error, ManualClock};

    /// Replace-semantics handle over a plain cell, no expiry
    struct CellHandle {
        value: Value,
        reads: usize,
        applies: usize,
    }

    impl CellHandle {
        fn new() -> Self {
            Self {
                value: Value::Null,
                reads: 0,
                applies: 0,
            }
        }
    }

    impl TtlStateHandle for CellHandle {
        fn read(&mut self) -> Result<Value> {
            self.reads += 1;
            Ok(self.value.clone())
        }

        fn apply(&mut self, update: &Value) -> Result<()> {
            self.applies += 1;
            self.value = update.clone();
            Ok(())
        }

        fn clear(&mut self) -> Result<()> {
            self.value = Value::Null;
            Ok(())
        }
    }

    /// Handle whose reads fail
    struct FailingHandle;

    impl TtlStateHandle for FailingHandle {
        fn read(&mut self) -> Result<Value> {
            Err(Error::storage("state store unavailable"))
        }

        fn apply(&mut self, _update: &Value) -> Result<()> {
            Err(Error::storage("state store unavailable"))
        }

        fn clear(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_cycle_observes_before_and_after() {
        let clock = ManualClock::with_step(100, 5);
        let mut handle = CellHandle::new();

        let ctx = build_update_context(&clock, &mut handle, &Value::Int(7)).unwrap();

        assert_eq!(ctx.value_before, Value::Null);
        assert_eq!(ctx.update, Value::Int(7));
        assert_eq!(ctx.value_after, Value::Int(7));
        assert_eq!(ctx.before_ts.as_millis(), 100);
        assert_eq!(ctx.after_ts.as_millis(), 105);
    }

    #[test]
    fn test_cycle_mutates_exactly_once() {
        let clock = ManualClock::new(0);
        let mut handle = CellHandle::new();

        build_update_context(&clock, &mut handle, &Value::Int(1)).unwrap();

        assert_eq!(handle.applies, 1);
        assert_eq!(handle.reads, 2);
    }

    #[test]
    fn test_update_with_ts_carries_window() {
        let clock = ManualClock::with_step(10, 3);
        let mut handle = CellHandle::new();

        let ctx = build_update_context(&clock, &mut handle, &Value::Int(9)).unwrap();
        let record = ctx.update_with_ts().unwrap();

        assert_eq!(record.value(), &Value::Int(9));
        assert_eq!(record.before_ts().as_millis(), 10);
        assert_eq!(record.after_ts().as_millis(), 13);
    }

    #[test]
    fn test_collaborator_failure_propagates() {
        let clock = ManualClock::new(0);
        let mut handle = FailingHandle;

        let result = build_update_context(&clock, &mut handle, &Value::Int(1));
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn test_display_renders_full_cycle() {
        let ctx = UpdateContext {
            value_before: Value::Null,
            update: Value::Int(1),
            value_after: Value::Int(1),
            before_ts: Timestamp::from_millis(1000),
            after_ts: Timestamp::from_millis(1002),
        };
        let rendered = ctx.to_string();
        assert!(rendered.contains("before=null"));
        assert!(rendered.contains("update=1"));
        assert!(rendered.contains("window=[1.000, 1.002]"));
    }
}
