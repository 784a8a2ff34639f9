//! Message contract registry and envelope serialization for messaging
//! endpoints.
//!
//! contractprims maps wire-level contract identifiers to the Rust types
//! allowed to deserialize them, and moves those types in and out of
//! broker-neutral envelopes.
//!
//! # Crate Structure
//!
//! - [`registry`] — Concurrent identifier → contract type registry
//! - [`envelope`] — Message envelopes and serializer seams (behind `envelope` feature)
//! - [`logging`] — `tracing` subscriber setup (behind `logging` feature)

/// Re-export registry types.
pub mod registry {
    pub use contractprims_registry::*;
}

/// Re-export envelope types (requires `envelope` feature).
#[cfg(feature = "envelope")]
pub mod envelope {
    pub use contractprims_envelope::*;
}

#[cfg(feature = "logging")]
pub mod logging;

pub use contractprims_registry::{Contract, ContractRegistry, ContractType};
