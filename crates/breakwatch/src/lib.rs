//! Top-level facade crate for breakwatch.
//!
//! Re-exports the registry core and the reporting gateway so users can depend on a single crate.

pub mod core {
    pub use breakwatch_core::*;
}

pub mod gateway {
    pub use breakwatch_gateway::*;
}
