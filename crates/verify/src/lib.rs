//! Verification engine for TTL-protected key-value stores
//!
//! Vigil watches a TTL store from the outside: it drives random updates
//! through the store's own API, brackets every update with two wall-clock
//! readings, and checks each observed value against every expiry schedule
//! the timing evidence cannot rule out. A verdict is only rendered when it
//! is unambiguous; a correct store is never reported broken.
//!
//! The moving parts, leaves first:
//! - [`TimestampedValue`]: an update payload plus the instants bracketing it
//! - [`build_update_context`]: one timestamped read-update-read cycle
//! - [`ClashDetector`]: decides whether a cycle's timing is ambiguous
//! - [`HistoryStore`]: the ordered record of accepted updates per key/verifier
//! - [`UpdateStats`]: running counters with periodic summaries
//! - [`TtlVerifier`] + the built-in verifiers: per-shape judgment
//! - [`VerificationOrchestrator`]: wires it all over an event stream

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clash;
pub mod config;
pub mod context;
pub mod history;
pub mod orchestrator;
pub mod state;
pub mod stats;
pub mod timestamped;
pub mod verifier;
pub mod verifiers;

pub use clash::ClashDetector;
pub use config::VerifyConfig;
pub use context::{build_update_context, UpdateContext};
pub use history::{HistoryStore, InMemoryHistoryStore};
pub use orchestrator::VerificationOrchestrator;
pub use state::{StateBackend, StateDescriptor, StateShape, TtlStateHandle};
pub use stats::{StatsReport, UpdateStats};
pub use timestamped::TimestampedValue;
pub use verifier::{random_event, TtlVerifier, VerificationContext};
pub use verifiers::{default_verifiers, ListVerifier, MapVerifier, SumVerifier, ValueVerifier};
