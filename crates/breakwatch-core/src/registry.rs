use parking_lot::RwLock;

use std::collections::HashMap;
use std::sync::Arc;

use crate::breaker::{self, BreakerHandle, BreakerState};
use crate::error::{BreakwatchError, Result};

/// Point-in-time read of one breaker.
///
/// `state` is `None` when the breaker could not report a single state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub name: String,
    pub state: Option<BreakerState>,
}

/// Name index plus entries in registration order.
///
/// Entries are never removed individually, so indexes stay valid until `clear`.
#[derive(Default)]
struct BreakerTable {
    index: HashMap<String, usize>,
    entries: Vec<(String, BreakerHandle)>,
}

/// Breaker registry: `name -> BreakerHandle`.
///
/// Names are unique for the lifetime of the registry. A second registration
/// under a taken name fails instead of replacing the first handle. One
/// registry-wide lock guards the table, so every copy taken under the read
/// lock is a state the registry actually held.
#[derive(Default)]
pub struct BreakerRegistry {
    table: RwLock<BreakerTable>,
}

impl BreakerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handle` under `name`.
    ///
    /// The uniqueness check and the insert happen under the write lock, so of
    /// two concurrent calls with one name exactly one succeeds.
    pub fn register(&self, name: impl Into<String>, handle: BreakerHandle) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BreakwatchError::InvalidArgument(
                "circuit breaker name must not be blank".into(),
            ));
        }

        let mut table = self.table.write();
        if table.index.contains_key(&name) {
            drop(table);
            tracing::warn!(breaker = %name, "duplicate circuit breaker registration rejected");
            return Err(BreakwatchError::DuplicateRegistration { name });
        }

        let pos = table.entries.len();
        table.index.insert(name.clone(), pos);
        table.entries.push((name.clone(), handle));
        drop(table);

        tracing::info!(breaker = %name, pos, "circuit breaker registered");
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.read().index.contains_key(name)
    }

    /// Handle registered under `name`, if any. Absence is not an error.
    pub fn lookup(&self, name: &str) -> Option<BreakerHandle> {
        let table = self.table.read();
        let found = table
            .index
            .get(name)
            .and_then(|&pos| table.entries.get(pos))
            .map(|(_, handle)| Arc::clone(handle));
        drop(table);

        tracing::debug!(breaker = %name, found = found.is_some(), "circuit breaker lookup");
        found
    }

    pub fn len(&self) -> usize {
        self.table.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().entries.is_empty()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.table
            .read()
            .entries
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Read the state of every registered breaker, in registration order.
    ///
    /// The entry set is copied under one read lock; breakers are queried
    /// after it is released, so a breaker that touches the registry while
    /// answering cannot deadlock it.
    pub fn snapshot_all(&self) -> Vec<StateSnapshot> {
        let entries: Vec<(String, BreakerHandle)> = self.table.read().entries.clone();

        entries
            .into_iter()
            .map(|(name, handle)| {
                let state = breaker::probe(handle.as_ref());
                if state.is_none() {
                    tracing::warn!(breaker = %name, "circuit breaker state could not be determined");
                }
                StateSnapshot { name, state }
            })
            .collect()
    }

    /// Drop every entry. Idempotent; meant for orderly shutdown.
    pub fn clear(&self) {
        let mut table = self.table.write();
        let n = table.entries.len();
        table.index.clear();
        table.entries.clear();
        drop(table);
        tracing::debug!(removed = n, "circuit breaker registry cleared");
    }
}
