//! Concurrent registry binding wire-level contract identifiers to message types.
//!
//! A message arriving from a broker carries a contract identifier naming its
//! payload shape. The [`ContractRegistry`] maps those identifiers to the
//! in-process types authorized to deserialize them, rejecting collisions
//! between distinct types and tolerating idempotent re-registration.
//!
//! Identifiers are never invented by the registry. They come from a pure
//! derivation function supplied at construction; see [`derive`] for the
//! ready-made ones.

pub mod config;
pub mod contract;
pub mod derive;
pub mod error;
pub mod module;
pub mod registry;

pub use config::RegistryConfig;
pub use contract::{Contract, ContractType};
pub use error::{RegistryError, Result};
pub use module::{ContractModule, ContractSource};
pub use registry::{ContractRegistry, DeriveFn, RegistryBuilder};
