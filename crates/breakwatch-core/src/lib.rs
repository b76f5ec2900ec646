//! breakwatch core: the circuit breaker registry and its state reporting.
//!
//! This crate owns breaker identity (unique names, lookup) and the read path
//! that projects every registered breaker into a state record. It carries no
//! transport or runtime dependencies; the breaker state machine itself lives
//! behind the [`CircuitBreaker`] trait.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! Registration failures surface as `BreakwatchError`/`Result`, and a
//! misbehaving breaker degrades to an `unknown` record instead of failing
//! the whole report.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod breaker;
pub mod error;
pub mod registry;
pub mod report;

pub use breaker::{BreakerHandle, BreakerState, CircuitBreaker, ManualBreaker};
pub use error::{BreakwatchError, ClientCode, Result};
pub use registry::{BreakerRegistry, StateSnapshot};
pub use report::{BreakerStateRecord, Reporter};
