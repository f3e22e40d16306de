//! Aggregate (sum) verifier
//!
//! Drives a single accumulator: each update adds an integer, and each add
//! rewrites the whole accumulator, refreshing its TTL. The accumulator
//! therefore survives as long as consecutive accepted updates stay within
//! one TTL of each other; a wider gap kills it and the next add starts a
//! fresh sum.

use crate::clash::ClashDetector;
use crate::state::StateShape;
use crate::verifier::{TtlVerifier, VerificationContext};
use rand::RngCore;
use vigil_core::Value;

/// Verifier for [`StateShape::Aggregate`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SumVerifier;

impl SumVerifier {
    /// Sum of the live chain ending at the last accepted update, `None` if
    /// the history is empty
    ///
    /// Walks acceptance order; whenever the gap to the previous update
    /// exceeds the TTL the running sum restarts at the current update.
    fn live_chain_sum(
        detector: &ClashDetector,
        ctx: &VerificationContext,
    ) -> Option<i64> {
        let mut sum: Option<i64> = None;
        let mut last = None;
        for prev in &ctx.prev_updates {
            let add = prev.value().as_int().unwrap_or(0);
            sum = match last {
                Some(earlier) if !detector.expired_before(earlier, prev.before_ts()) => {
                    Some(sum.unwrap_or(0) + add)
                }
                _ => Some(add),
            };
            last = Some(prev);
        }
        sum
    }
}

impl TtlVerifier for SumVerifier {
    fn id(&self) -> &'static str {
        "sum"
    }

    fn shape(&self) -> StateShape {
        StateShape::Aggregate
    }

    fn random_update(&self, rng: &mut dyn RngCore) -> Value {
        Value::Int((rng.next_u32() % 100) as i64)
    }

    fn verify(&self, detector: &ClashDetector, ctx: &VerificationContext) -> bool {
        let cycle = &ctx.update_context;
        let Some(add) = cycle.update.as_int() else {
            return false;
        };

        // The chain only matters if its last link reached the candidate
        let live_sum = match (Self::live_chain_sum(detector, ctx), ctx.prev_updates.last()) {
            (Some(sum), Some(last)) if !detector.expired_before(last, cycle.before_ts) => Some(sum),
            _ => None,
        };

        let expected_before = match live_sum {
            Some(sum) => Value::Int(sum),
            None => Value::Null,
        };
        let expected_after = Value::Int(live_sum.unwrap_or(0) + add);

        cycle.value_before == expected_before && cycle.value_after == expected_after
    }
}
