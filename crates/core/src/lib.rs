//! Core types for Vigil
//!
//! This crate defines the foundational types used throughout the system:
//! - Timestamp: millisecond wall-clock instant
//! - Clock: injected time source (SystemClock, ManualClock)
//! - Value: unified value enum for all verified state shapes
//! - UpdateEvent: one raw update per verifier for a partition key
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod error;
pub mod event;
pub mod timestamp;
pub mod value;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use event::UpdateEvent;
pub use timestamp::Timestamp;
pub use value::Value;
