//! Vigil - external TTL correctness verification for key-value stores
//!
//! Vigil verifies a TTL-protected key-value store from the outside. It never
//! implements a store itself: the host plugs in a [`StateBackend`] for the
//! store under verification and a [`HistoryStore`] for durable bookkeeping,
//! and feeds the pipeline an ordered stream of [`UpdateEvent`]s. Failed
//! verifications come back as diagnostic strings; timing ambiguities are
//! absorbed internally and only surface in the periodic stats.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use vigil::{
//!     default_verifiers, InMemoryHistoryStore, SystemClock, UpdateEvent, Value,
//!     VerificationOrchestrator, VerifyConfig,
//! };
//!
//! let config = VerifyConfig::new(1_000, 1_000)?;
//! let mut pipeline = VerificationOrchestrator::new(
//!     &config,
//!     default_verifiers(),
//!     backend,                              // the store under verification
//!     Arc::new(InMemoryHistoryStore::new()),
//!     Arc::new(SystemClock::new()),
//! );
//!
//! let event = UpdateEvent::new("user:123").with_update("value", Value::Int(7));
//! for diagnostic in pipeline.process(&event)? {
//!     eprintln!("{diagnostic}");
//! }
//! ```

// Re-export the public API from the member crates
pub use vigil_core::{
    Clock, Error, ManualClock, Result, SystemClock, Timestamp, UpdateEvent, Value,
};
pub use vigil_verify::*;
