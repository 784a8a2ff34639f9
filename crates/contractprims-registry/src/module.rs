use crate::contract::{Contract, ContractType};

/// Something that can enumerate candidate contract types.
///
/// Stands in for reflecting over a compiled unit: the implementor decides
/// which types are exported and in which order. The order must be stable.
pub trait ContractSource {
    /// Candidate types in enumeration order.
    fn contract_types(&self) -> Vec<ContractType>;
}

/// A named, ordered group of contract types registered together.
///
/// ```
/// use contractprims_registry::{Contract, ContractModule};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Ping;
/// impl Contract for Ping {
///     const CONTRACT_ID: Option<&'static str> = Some("ping");
/// }
///
/// let module = ContractModule::new("health").with::<Ping>();
/// assert_eq!(module.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContractModule {
    name: String,
    types: Vec<ContractType>,
}

impl ContractModule {
    /// Create an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// Add `T` to the module.
    pub fn with<T: Contract>(self) -> Self {
        self.with_type(ContractType::of::<T>())
    }

    /// Add a descriptor to the module. A type already present is kept once,
    /// at its first position.
    pub fn with_type(mut self, contract: ContractType) -> Self {
        self.push(contract);
        self
    }

    /// Add a descriptor in place.
    pub fn push(&mut self, contract: ContractType) {
        if !self.types.contains(&contract) {
            self.types.push(contract);
        }
    }

    /// Module name, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Types in enumeration order.
    pub fn types(&self) -> &[ContractType] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl ContractSource for ContractModule {
    fn contract_types(&self) -> Vec<ContractType> {
        self.types.clone()
    }
}

impl ContractSource for [ContractType] {
    fn contract_types(&self) -> Vec<ContractType> {
        self.to_vec()
    }
}

impl<const N: usize> ContractSource for [ContractType; N] {
    fn contract_types(&self) -> Vec<ContractType> {
        self.to_vec()
    }
}

impl ContractSource for Vec<ContractType> {
    fn contract_types(&self) -> Vec<ContractType> {
        self.clone()
    }
}
