//! Built-in verifiers, one per state shape
//!
//! Each verifier reconstructs the uniquely-determined visible state from the
//! accepted history and the candidate's window, then compares it with what
//! the store actually returned. The reconstruction leans on the clash
//! guarantee: for an unambiguous pair, a prior update either expired strictly
//! before the candidate's window opened or survives strictly past its close,
//! so filtering by the window start is valid for both the before-read and the
//! after-read.

mod list;
mod map;
mod sum;
mod value;

pub use list::ListVerifier;
pub use map::MapVerifier;
pub use sum::SumVerifier;
pub use value::ValueVerifier;

use crate::clash::ClashDetector;
use crate::timestamped::TimestampedValue;
use crate::verifier::TtlVerifier;
use std::sync::Arc;
use vigil_core::Timestamp;

/// The default registry: one verifier per state shape
pub fn default_verifiers() -> Vec<Arc<dyn TtlVerifier>> {
    vec![
        Arc::new(ValueVerifier),
        Arc::new(ListVerifier),
        Arc::new(MapVerifier),
        Arc::new(SumVerifier),
    ]
}

/// Prior updates guaranteed still visible at `window_start`
pub(crate) fn surviving<'a>(
    detector: &'a ClashDetector,
    prev_updates: &'a [TimestampedValue],
    window_start: Timestamp,
) -> impl Iterator<Item = &'a TimestampedValue> {
    prev_updates
        .iter()
        .filter(move |prev| !detector.expired_before(prev, window_start))
}
