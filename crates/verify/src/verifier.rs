//! Verifier capability interface and verification context
//!
//! A verifier is a pluggable policy for one kind of TTL-governed value. It
//! names the state shape it exercises, draws the random payloads that drive
//! it, and judges a completed update cycle against the accepted history.
//! The pipeline treats every verifier uniformly through this capability set;
//! whatever domain knowledge a verdict needs lives behind `verify`.

use crate::clash::ClashDetector;
use crate::context::UpdateContext;
use crate::state::StateShape;
use crate::timestamped::TimestampedValue;
use rand::RngCore;
use std::sync::Arc;
use vigil_core::{UpdateEvent, Value};

/// Pluggable per-shape verification policy
///
/// Implementations must be stateless (`Send + Sync`, shared via `Arc`):
/// everything a verdict depends on arrives in the [`VerificationContext`].
pub trait TtlVerifier: Send + Sync {
    /// Stable identifier; keys update payloads, history, and diagnostics
    fn id(&self) -> &'static str;

    /// The state primitive this verifier drives
    fn shape(&self) -> StateShape;

    /// Draw one raw update payload
    fn random_update(&self, rng: &mut dyn RngCore) -> Value;

    /// Judge a completed cycle against the accepted history
    ///
    /// The history is guaranteed unambiguous with respect to the candidate
    /// (the pipeline has already reset otherwise), so the visible state is
    /// uniquely determined and a `false` here means the store misbehaved.
    fn verify(&self, detector: &ClashDetector, ctx: &VerificationContext) -> bool;
}

/// Everything a verdict is based on, and everything a diagnostic reports
#[derive(Debug, Clone)]
pub struct VerificationContext {
    /// Partition key under evaluation
    pub key: String,
    /// Verifier that produced this context
    pub verifier_id: String,
    /// Accepted history the candidate was checked against, oldest first
    pub prev_updates: Vec<TimestampedValue>,
    /// The completed read-update-read cycle
    pub update_context: UpdateContext,
}

impl std::fmt::Display for VerificationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "verification failed: key={:?} verifier={} {} history[{}]=[",
            self.key,
            self.verifier_id,
            self.update_context,
            self.prev_updates.len()
        )?;
        for (i, prev) in self.prev_updates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", prev)?;
        }
        write!(f, "]")
    }
}

/// Build an event carrying one random payload per configured verifier
///
/// The stream source feeding a production pipeline is a host concern; this
/// helper is what test drivers and embedded harnesses use in its place.
pub fn random_event(
    key: impl Into<String>,
    verifiers: &[Arc<dyn TtlVerifier>],
    rng: &mut dyn RngCore,
) -> UpdateEvent {
    let mut event = UpdateEvent::new(key);
    for verifier in verifiers {
        event = event.with_update(verifier.id(), verifier.random_update(rng));
    }
    event
}
