//! State reporting: registry contents -> externally consumable records.
//!
//! The wire form keeps three mutually exclusive booleans instead of a single
//! enum. A breaker whose state could not be read is reported with all three
//! set to `false`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::breaker::BreakerState;
use crate::registry::{BreakerRegistry, StateSnapshot};

/// One reported breaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakerStateRecord {
    pub name: String,
    pub closed: bool,
    pub open: bool,
    pub half_open: bool,
}

impl BreakerStateRecord {
    /// True when exactly one state flag is set.
    pub fn is_known(&self) -> bool {
        [self.closed, self.open, self.half_open]
            .iter()
            .filter(|f| **f)
            .count()
            == 1
    }
}

impl From<StateSnapshot> for BreakerStateRecord {
    fn from(s: StateSnapshot) -> Self {
        Self {
            name: s.name,
            closed: s.state == Some(BreakerState::Closed),
            open: s.state == Some(BreakerState::Open),
            half_open: s.state == Some(BreakerState::HalfOpen),
        }
    }
}

/// Read path over a shared registry.
#[derive(Clone)]
pub struct Reporter {
    registry: Arc<BreakerRegistry>,
}

impl Reporter {
    pub fn new(registry: Arc<BreakerRegistry>) -> Self {
        Self { registry }
    }

    /// Current state of every registered breaker, in registration order.
    /// An empty registry yields an empty list.
    pub fn report(&self) -> Vec<BreakerStateRecord> {
        let records: Vec<BreakerStateRecord> = self
            .registry
            .snapshot_all()
            .into_iter()
            .map(BreakerStateRecord::from)
            .collect();
        tracing::debug!(breakers = records.len(), "circuit breaker report built");
        records
    }
}
