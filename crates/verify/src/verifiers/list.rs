//! List verifier
//!
//! Drives an append-semantics list whose elements expire independently, each
//! from its own insertion instant. The value read before the candidate must
//! be exactly the surviving elements in insertion order; the value read after
//! must be those plus the new element.

use crate::clash::ClashDetector;
use crate::state::StateShape;
use crate::verifier::{TtlVerifier, VerificationContext};
use crate::verifiers::surviving;
use rand::RngCore;
use vigil_core::Value;

/// Verifier for [`StateShape::List`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ListVerifier;

impl TtlVerifier for ListVerifier {
    fn id(&self) -> &'static str {
        "list"
    }

    fn shape(&self) -> StateShape {
        StateShape::List
    }

    fn random_update(&self, rng: &mut dyn RngCore) -> Value {
        Value::Int((rng.next_u32() % 1_000) as i64)
    }

    fn verify(&self, detector: &ClashDetector, ctx: &VerificationContext) -> bool {
        let cycle = &ctx.update_context;
        let expected_before: Vec<Value> = surviving(detector, &ctx.prev_updates, cycle.before_ts)
            .map(|prev| prev.value().clone())
            .collect();

        let mut expected_after = expected_before.clone();
        expected_after.push(cycle.update.clone());

        cycle.value_before == Value::Array(expected_before)
            && cycle.value_after == Value::Array(expected_after)
    }
}
