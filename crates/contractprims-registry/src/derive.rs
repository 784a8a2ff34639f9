//! Ready-made identifier derivation functions.
//!
//! Any `Fn(&ContractType) -> Option<String>` works as a derivation; these
//! cover the common naming schemes. Returning `None` (or a blank string)
//! opts a type out of registration.

use crate::contract::ContractType;

/// The identifier the type declares through `Contract::CONTRACT_ID`.
pub fn declared_id(contract: &ContractType) -> Option<String> {
    contract.declared_id().map(str::to_owned)
}

/// The fully-qualified Rust type name.
pub fn type_name(contract: &ContractType) -> Option<String> {
    Some(contract.type_name().to_owned())
}

/// The last path segment of the type name, without generic arguments.
pub fn short_type_name(contract: &ContractType) -> Option<String> {
    Some(contract.short_name().to_owned())
}

/// The declared identifier, falling back to [`short_type_name`].
pub fn declared_or_short_name(contract: &ContractType) -> Option<String> {
    declared_id(contract).or_else(|| short_type_name(contract))
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::contract::Contract;

    #[derive(Serialize, Deserialize)]
    struct Declared;

    impl Contract for Declared {
        const CONTRACT_ID: Option<&'static str> = Some("declared.v2");
    }

    #[derive(Serialize, Deserialize)]
    struct Undeclared;

    impl Contract for Undeclared {}

    #[test]
    fn declared_id_opts_out_undeclared_types() {
        assert_eq!(
            declared_id(&ContractType::of::<Declared>()),
            Some("declared.v2".to_string())
        );
        assert_eq!(declared_id(&ContractType::of::<Undeclared>()), None);
    }

    #[test]
    fn name_based_derivations() {
        let ty = ContractType::of::<Undeclared>();
        assert_eq!(short_type_name(&ty), Some("Undeclared".to_string()));
        assert_eq!(type_name(&ty).as_deref(), Some(ty.type_name()));
    }

    #[test]
    fn declared_wins_over_short_name() {
        assert_eq!(
            declared_or_short_name(&ContractType::of::<Declared>()),
            Some("declared.v2".to_string())
        );
        assert_eq!(
            declared_or_short_name(&ContractType::of::<Undeclared>()),
            Some("Undeclared".to_string())
        );
    }
}
