use std::net::SocketAddr;

use breakwatch_core::error::{BreakwatchError, Result};
use breakwatch_core::BreakerState;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub endpoints: EndpointsSection,

    #[serde(default)]
    pub registry: RegistrySection,

    #[serde(default)]
    pub breakers: Vec<BreakerConfig>,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BreakwatchError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.endpoints.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            BreakwatchError::Config(format!(
                "server.listen must be a valid socket address ({}): {e}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

/// Exposure switches for the HTTP surface.
///
/// `enabled` is the default for every endpoint; `failsafe.enabled` overrides
/// it for the breaker report only.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointsSection {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub failsafe: FailsafeEndpoint,
}

impl Default for EndpointsSection {
    fn default() -> Self {
        Self {
            enabled: true,
            failsafe: FailsafeEndpoint::default(),
        }
    }
}

impl EndpointsSection {
    pub fn failsafe_enabled(&self) -> bool {
        self.failsafe.enabled.unwrap_or(self.enabled)
    }

    pub fn validate(&self) -> Result<()> {
        let path = self.failsafe.path.as_str();
        if !path.starts_with('/') || path.len() < 2 {
            return Err(BreakwatchError::Config(
                "endpoints.failsafe.path must start with '/' and name a route".into(),
            ));
        }
        if RESERVED_PATHS.contains(&path) {
            return Err(BreakwatchError::Config(format!(
                "endpoints.failsafe.path collides with a built-in route: {path}"
            )));
        }
        Ok(())
    }
}

const RESERVED_PATHS: [&str; 2] = ["/healthz", "/metrics"];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FailsafeEndpoint {
    #[serde(default)]
    pub enabled: Option<bool>,

    #[serde(default = "default_failsafe_path")]
    pub path: String,
}

impl Default for FailsafeEndpoint {
    fn default() -> Self {
        Self {
            enabled: None,
            path: default_failsafe_path(),
        }
    }
}

fn default_failsafe_path() -> String {
    "/failsafe".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    /// Abort startup when two breakers claim the same name.
    #[serde(default = "default_true")]
    pub fail_fast_on_duplicate: bool,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            fail_fast_on_duplicate: true,
        }
    }
}

/// A breaker created and registered at startup.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BreakerConfig {
    pub name: String,

    #[serde(default = "default_initial_state")]
    pub initial_state: BreakerState,
}

fn default_initial_state() -> BreakerState {
    BreakerState::Closed
}

fn default_true() -> bool {
    true
}
