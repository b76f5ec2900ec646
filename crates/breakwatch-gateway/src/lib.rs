//! breakwatch gateway library entry.
//!
//! This crate wires configuration, the breaker registry bootstrap, and the
//! HTTP reporting surface into a runnable service. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod server;
