//! Shared application state for the breakwatch gateway.
//!
//! Owns the wiring between config, the breaker registry, and the reporter.
//! Configured breakers are registered here, once, before the router is built.

use std::collections::HashMap;
use std::sync::Arc;

use breakwatch_core::error::{BreakwatchError, Result};
use breakwatch_core::{BreakerRegistry, ManualBreaker, Reporter};

use crate::config::GatewayConfig;
use crate::obs::GatewayMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    registry: Arc<BreakerRegistry>,
    reporter: Reporter,
    metrics: Arc<GatewayMetrics>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    configured: HashMap<String, Arc<ManualBreaker>>,
}

impl AppState {
    /// Build application state around an externally owned registry.
    ///
    /// Breakers listed in `cfg.breakers` are created and registered. Blank
    /// names always fail startup; duplicate names fail it unless
    /// `registry.fail_fast_on_duplicate` is off, in which case the first
    /// registration is kept.
    pub fn new(cfg: GatewayConfig, registry: Arc<BreakerRegistry>) -> Result<Self> {
        let metrics = Arc::new(GatewayMetrics::default());
        let mut configured = HashMap::new();

        for b in &cfg.breakers {
            let breaker = Arc::new(ManualBreaker::new(b.initial_state));
            match registry.register(b.name.clone(), breaker.clone()) {
                Ok(()) => {
                    configured.insert(b.name.clone(), breaker);
                }
                Err(e @ BreakwatchError::DuplicateRegistration { .. }) => {
                    metrics
                        .registration_rejections
                        .inc(&[("reason", "duplicate")]);
                    if cfg.registry.fail_fast_on_duplicate {
                        return Err(e);
                    }
                    tracing::warn!(breaker = %b.name, "duplicate breaker in config ignored; first registration kept");
                }
                Err(e) => {
                    metrics.registration_rejections.inc(&[("reason", "invalid")]);
                    return Err(e);
                }
            }
        }

        tracing::info!(
            breakers = ?registry.names(),
            failsafe_enabled = cfg.endpoints.failsafe_enabled(),
            "breaker registry initialized"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, configured }),
            reporter: Reporter::new(Arc::clone(&registry)),
            registry,
            metrics,
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<BreakerRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Config-created breaker by name, for tooling that forces state.
    pub fn configured_breaker(&self, name: &str) -> Option<Arc<ManualBreaker>> {
        self.inner.configured.get(name).cloned()
    }
}
