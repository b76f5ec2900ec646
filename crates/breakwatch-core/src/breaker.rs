//! Breaker contract consumed by the registry.
//!
//! The registry never depends on a concrete breaker type. Anything that can
//! answer the three mutually exclusive state predicates can be registered,
//! including test doubles.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Protection state of a circuit breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakerState {
    /// Calls pass through.
    Closed,
    /// Calls are rejected immediately.
    Open,
    /// A trial call is allowed to test recovery.
    HalfOpen,
}

impl BreakerState {
    pub fn as_str(self) -> &'static str {
        match self {
            BreakerState::Closed => "closed",
            BreakerState::Open => "open",
            BreakerState::HalfOpen => "half_open",
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            BreakerState::Closed => 0,
            BreakerState::Open => 1,
            BreakerState::HalfOpen => 2,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            1 => BreakerState::Open,
            2 => BreakerState::HalfOpen,
            _ => BreakerState::Closed,
        }
    }
}

/// Three-predicate view of an externally implemented circuit breaker.
///
/// Exactly one predicate is expected to be true at read time.
pub trait CircuitBreaker: Send + Sync {
    fn is_closed(&self) -> bool;
    fn is_open(&self) -> bool;
    fn is_half_open(&self) -> bool;
}

/// Shared reference to a registered breaker.
pub type BreakerHandle = Arc<dyn CircuitBreaker>;

/// Read a breaker's current state.
///
/// Returns `None` when the predicates are not exactly-one-true or when the
/// breaker panics while being queried.
pub fn probe(breaker: &dyn CircuitBreaker) -> Option<BreakerState> {
    let read = panic::catch_unwind(AssertUnwindSafe(|| {
        (breaker.is_closed(), breaker.is_open(), breaker.is_half_open())
    }));

    match read {
        Ok((true, false, false)) => Some(BreakerState::Closed),
        Ok((false, true, false)) => Some(BreakerState::Open),
        Ok((false, false, true)) => Some(BreakerState::HalfOpen),
        _ => None,
    }
}

/// Breaker whose state only changes when forced from outside.
///
/// Used by the gateway for configured breakers and by tests/ops tooling. It
/// carries no failure counting or timers.
#[derive(Debug)]
pub struct ManualBreaker {
    state: AtomicU8,
}

impl ManualBreaker {
    pub fn new(initial: BreakerState) -> Self {
        Self {
            state: AtomicU8::new(initial.to_u8()),
        }
    }

    pub fn state(&self) -> BreakerState {
        BreakerState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn force(&self, state: BreakerState) {
        self.state.store(state.to_u8(), Ordering::Release);
    }

    pub fn close(&self) {
        self.force(BreakerState::Closed);
    }

    pub fn open(&self) {
        self.force(BreakerState::Open);
    }

    pub fn half_open(&self) {
        self.force(BreakerState::HalfOpen);
    }
}

impl Default for ManualBreaker {
    fn default() -> Self {
        Self::new(BreakerState::Closed)
    }
}

impl CircuitBreaker for ManualBreaker {
    fn is_closed(&self) -> bool {
        self.state() == BreakerState::Closed
    }

    fn is_open(&self) -> bool {
        self.state() == BreakerState::Open
    }

    fn is_half_open(&self) -> bool {
        self.state() == BreakerState::HalfOpen
    }
}
