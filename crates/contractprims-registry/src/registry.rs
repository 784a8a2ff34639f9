use std::fmt;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, trace, warn};

use crate::config::RegistryConfig;
use crate::contract::{Contract, ContractType};
use crate::error::{RegistryError, Result};
use crate::module::ContractSource;

/// Shared identifier derivation function.
///
/// Must be pure and deterministic: the registry re-invokes it on every
/// registration and type-based lookup instead of caching its answers.
pub type DeriveFn = Arc<dyn Fn(&ContractType) -> Option<String> + Send + Sync>;

/// Identifier-keyed registry of contract types.
///
/// The registry is append-only: an identifier, once bound, stays bound to the
/// same type for the lifetime of the registry. All operations take `&self`
/// and are safe to call from many threads at once; share the registry with
/// an `Arc`.
///
/// ```
/// use contractprims_registry::{derive, Contract, ContractRegistry};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct InvoicePaid { invoice: u64 }
/// impl Contract for InvoicePaid {
///     const CONTRACT_ID: Option<&'static str> = Some("billing.invoice-paid.v1");
/// }
///
/// let registry = ContractRegistry::new(derive::declared_id);
/// registry.register::<InvoicePaid>().unwrap();
///
/// let bound = registry.get_registered_contract("billing.invoice-paid.v1").unwrap();
/// assert!(bound.is::<InvoicePaid>());
/// ```
pub struct ContractRegistry {
    entries: DashMap<String, ContractType>,
    derive: DeriveFn,
    config: RegistryConfig,
}

impl ContractRegistry {
    /// Create an empty registry with default config.
    pub fn new<F>(derive: F) -> Self
    where
        F: Fn(&ContractType) -> Option<String> + Send + Sync + 'static,
    {
        Self::from_parts(Arc::new(derive), RegistryConfig::default())
    }

    /// Start building a registry with explicit config.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    fn from_parts(derive: DeriveFn, config: RegistryConfig) -> Self {
        let entries = match config.shard_amount {
            Some(shards) => {
                DashMap::with_capacity_and_shard_amount(config.initial_capacity, shards)
            }
            None => DashMap::with_capacity(config.initial_capacity),
        };

        Self {
            entries,
            derive,
            config,
        }
    }

    /// Register a single contract type.
    ///
    /// A type whose derived identifier is absent or blank is skipped without
    /// error. Re-registering the bound type is a no-op. Registering a
    /// different type under a bound identifier fails with
    /// [`RegistryError::ContractConflict`] and leaves the binding untouched.
    pub fn register_contract(&self, contract: ContractType) -> Result<&Self> {
        match self.identifier_for(&contract) {
            Some(identifier) => self.bind(identifier, contract)?,
            None => debug!(
                contract = contract.type_name(),
                "no contract identifier derived, skipping"
            ),
        }
        Ok(self)
    }

    /// Register `T`. See [`ContractRegistry::register_contract`].
    pub fn register<T: Contract>(&self) -> Result<&Self> {
        self.register_contract(ContractType::of::<T>())
    }

    /// Register every type a source enumerates, in its order.
    ///
    /// Types without an identifier are skipped. The first conflict aborts the
    /// call; bindings made before it are kept.
    pub fn register_contract_module<S>(&self, source: &S) -> Result<&Self>
    where
        S: ContractSource + ?Sized,
    {
        let candidates = source.contract_types();
        let total = candidates.len();
        let mut bound = 0usize;

        for contract in candidates {
            let Some(identifier) = self.identifier_for(&contract) else {
                trace!(
                    contract = contract.type_name(),
                    "no contract identifier derived, skipping"
                );
                continue;
            };
            self.bind(identifier, contract)?;
            bound += 1;
        }

        debug!(candidates = total, bound, "registered contract module");
        Ok(self)
    }

    /// Whether the identifier derived for `contract` is bound to any type.
    ///
    /// Returns false when no identifier can be derived.
    pub fn is_contract_type_registered(&self, contract: &ContractType) -> bool {
        self.identifier_for(contract)
            .is_some_and(|identifier| self.entries.contains_key(&identifier))
    }

    /// Whether the identifier derived for `T` is bound to any type.
    pub fn is_registered<T: Contract>(&self) -> bool {
        self.is_contract_type_registered(&ContractType::of::<T>())
    }

    /// Whether `identifier` is bound. Blank identifiers are never bound.
    pub fn is_contract_registered(&self, identifier: &str) -> bool {
        !is_blank(identifier) && self.entries.contains_key(identifier)
    }

    /// Resolve the type bound to `identifier`.
    pub fn get_registered_contract(&self, identifier: &str) -> Result<ContractType> {
        self.try_get_registered_contract(identifier)
            .ok_or_else(|| RegistryError::ContractNotFound {
                identifier: identifier.to_string(),
            })
    }

    /// Resolve the type bound to `identifier`, if any.
    pub fn try_get_registered_contract(&self, identifier: &str) -> Option<ContractType> {
        let found = self.entries.get(identifier).map(|entry| *entry.value());
        trace!(identifier, found = found.is_some(), "contract lookup");
        found
    }

    /// The identifier the derivation function yields for `contract`, or
    /// `None` when it yields nothing or only whitespace.
    pub fn identifier_for(&self, contract: &ContractType) -> Option<String> {
        (self.derive)(contract).filter(|identifier| !is_blank(identifier))
    }

    /// Bound identifiers, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        let mut identifiers: Vec<String> =
            self.entries.iter().map(|entry| entry.key().clone()).collect();
        identifiers.sort_unstable();
        identifiers
    }

    /// Number of bound identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // Insert-if-absent, else compare. The entry guard holds the shard lock,
    // so concurrent binders of one identifier serialize here. Events are
    // emitted only after the guard is released.
    fn bind(&self, identifier: String, contract: ContractType) -> Result<()> {
        let outcome = match self.entries.entry(identifier) {
            Entry::Vacant(slot) => {
                let identifier = slot.key().clone();
                slot.insert(contract);
                Bound::Inserted(identifier)
            }
            Entry::Occupied(slot) if *slot.get() == contract => {
                Bound::Existing(slot.key().clone())
            }
            Entry::Occupied(slot) => Bound::Conflict(slot.key().clone(), *slot.get()),
        };

        match outcome {
            Bound::Inserted(identifier) => {
                debug!(
                    identifier = identifier.as_str(),
                    contract = contract.type_name(),
                    "registered contract"
                );
                Ok(())
            }
            Bound::Existing(identifier) => {
                trace!(
                    identifier = identifier.as_str(),
                    contract = contract.type_name(),
                    "contract already registered"
                );
                Ok(())
            }
            Bound::Conflict(identifier, existing) => {
                warn!(
                    identifier = identifier.as_str(),
                    existing = existing.type_name(),
                    attempted = contract.type_name(),
                    "contract identifier conflict"
                );
                Err(RegistryError::ContractConflict {
                    identifier,
                    existing: existing.type_name(),
                    attempted: contract.type_name(),
                })
            }
        }
    }
}

enum Bound {
    Inserted(String),
    Existing(String),
    Conflict(String, ContractType),
}

impl fmt::Debug for ContractRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractRegistry")
            .field("len", &self.entries.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for a [`ContractRegistry`] with explicit config.
#[derive(Default)]
pub struct RegistryBuilder {
    derive: Option<DeriveFn>,
    config: RegistryConfig,
}

impl RegistryBuilder {
    /// Set the identifier derivation function.
    pub fn derive_with<F>(self, derive: F) -> Self
    where
        F: Fn(&ContractType) -> Option<String> + Send + Sync + 'static,
    {
        self.derive_fn(Some(Arc::new(derive)))
    }

    /// Set (or clear) a shared derivation function.
    pub fn derive_fn(mut self, derive: Option<DeriveFn>) -> Self {
        self.derive = derive;
        self
    }

    /// Set registry config.
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the registry.
    ///
    /// Fails with [`RegistryError::InvalidArgument`] when no derivation
    /// function was supplied or the config is invalid.
    pub fn build(self) -> Result<ContractRegistry> {
        let derive = self.derive.ok_or_else(|| {
            RegistryError::InvalidArgument(
                "an identifier derivation function is required".to_string(),
            )
        })?;
        self.config.validate()?;
        Ok(ContractRegistry::from_parts(derive, self.config))
    }
}

fn is_blank(identifier: &str) -> bool {
    identifier.trim().is_empty()
}
