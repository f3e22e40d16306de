//! Single-value verifier
//!
//! Drives a replace-semantics value: every update overwrites the stored
//! value and refreshes its TTL. Only the last accepted update matters: the
//! value read before the candidate must be that update's payload if it
//! survived, `Null` if it expired.

use crate::clash::ClashDetector;
use crate::state::StateShape;
use crate::verifier::{TtlVerifier, VerificationContext};
use rand::RngCore;
use vigil_core::Value;

/// Verifier for [`StateShape::Value`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueVerifier;

impl TtlVerifier for ValueVerifier {
    fn id(&self) -> &'static str {
        "value"
    }

    fn shape(&self) -> StateShape {
        StateShape::Value
    }

    fn random_update(&self, rng: &mut dyn RngCore) -> Value {
        Value::Int((rng.next_u32() % 1_000) as i64)
    }

    fn verify(&self, detector: &ClashDetector, ctx: &VerificationContext) -> bool {
        let cycle = &ctx.update_context;
        let expected_before = match ctx.prev_updates.last() {
            Some(last) if !detector.expired_before(last, cycle.before_ts) => last.value().clone(),
            _ => Value::Null,
        };
        cycle.value_before == expected_before && cycle.value_after == cycle.update
    }
}
