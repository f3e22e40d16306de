//! Clash detection: deciding whether an update's timing is ambiguous
//!
//! The store's expiry sweep acts on a value at some instant the outside world
//! cannot observe; an update is only known to have landed somewhere inside
//! `[before_ts, after_ts]`. Two updates clash when no assignment of actual
//! instants inside their windows makes the TTL outcome determinate. In that
//! situation no verdict about the store can be trusted, and the only sound
//! move is to reset and rebuild a clean baseline.
//!
//! The decision rule, in order:
//!
//! 1. Self too slow: the update's own window spans a full TTL
//!    (`after - before >= ttl`). The sweep may have fired mid-update;
//!    ambiguous regardless of history.
//! 2. Pairwise window overlap against every prior update `p`:
//!    `p.after + ttl >= c.before && p.before + ttl <= c.after`.
//!    The interval during which `p`'s value may still be alive intersects
//!    the candidate's window in a way that leaves the expiry order open.
//! 3. Otherwise the candidate is clean.
//!
//! Boundary equality counts as a clash. The tie-break deliberately leans
//! toward declaring ambiguity: a spurious reset costs one extra cycle, a
//! false "clean" verdict could mask a real expiry bug.
//!
//! For an unambiguous pair exactly one of two facts holds: the prior update
//! expired strictly before the candidate's window opened, or it survives
//! strictly past the candidate's window close. [`ClashDetector::expired_before`]
//! exposes that crisp decision; the built-in verifiers use it to reconstruct
//! the uniquely-determined visible state.

use crate::timestamped::TimestampedValue;
use std::time::Duration;
use vigil_core::Timestamp;

/// Decides timing ambiguity for one configured TTL
///
/// All methods are pure functions of timestamps and the TTL; the same inputs
/// always produce the same verdict.
#[derive(Debug, Clone, Copy)]
pub struct ClashDetector {
    ttl_millis: u64,
}

impl ClashDetector {
    /// Create a detector for the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl_millis: ttl.as_millis() as u64,
        }
    }

    /// The configured TTL in milliseconds
    #[inline]
    pub fn ttl_millis(&self) -> u64 {
        self.ttl_millis
    }

    /// Decide whether `candidate` is ambiguous against the accepted history
    ///
    /// An empty history can only clash through the self-too-slow rule.
    pub fn is_ambiguous(&self, candidate: &TimestampedValue, history: &[TimestampedValue]) -> bool {
        self.too_slow(candidate) || history.iter().any(|prev| self.windows_clash(prev, candidate))
    }

    /// Rule 1: the update's own window spans a full TTL
    pub fn too_slow(&self, candidate: &TimestampedValue) -> bool {
        candidate.window_millis() >= self.ttl_millis
    }

    /// Rule 2: the TTL-extended window of `prev` overlaps `next`'s window
    ///
    /// Non-strict on both bounds; exact boundary timestamps count as a clash.
    pub fn windows_clash(&self, prev: &TimestampedValue, next: &TimestampedValue) -> bool {
        prev.after_ts().saturating_add_millis(self.ttl_millis) >= next.before_ts()
            && prev.before_ts().saturating_add_millis(self.ttl_millis) <= next.after_ts()
    }

    /// Crisp expiry decision for unambiguous pairs
    ///
    /// True iff `prev`'s value is guaranteed gone by `instant`
    /// (`prev.after + ttl < instant`). When `prev` does not clash with a
    /// window opening at `instant`, the negation means `prev` is guaranteed
    /// still alive; there is no third case.
    pub fn expired_before(&self, prev: &TimestampedValue, instant: Timestamp) -> bool {
        prev.after_ts().saturating_add_millis(self.ttl_millis) < instant
    }
}
