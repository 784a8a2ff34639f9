use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Decodes a JSON body into a boxed instance of the contract type.
pub type DecodeFn = fn(&[u8]) -> serde_json::Result<Box<dyn Any + Send>>;

/// A message payload shape that can be bound to a contract identifier.
///
/// Implementors may declare their own wire identifier through
/// [`Contract::CONTRACT_ID`]. Whether that declaration is honored depends on
/// the derivation function the registry was built with.
pub trait Contract: Serialize + DeserializeOwned + Send + 'static {
    /// Identifier the type declares for itself, if any.
    const CONTRACT_ID: Option<&'static str> = None;
}

/// Opaque descriptor of a contract type.
///
/// Two descriptors are equal when they describe the same Rust type. The
/// descriptor carries everything needed to decode a body into that type
/// later on, without the caller naming the type statically.
#[derive(Clone, Copy)]
pub struct ContractType {
    type_id: TypeId,
    type_name: &'static str,
    declared_id: Option<&'static str>,
    decode: DecodeFn,
}

impl ContractType {
    /// Describe the contract type `T`.
    pub fn of<T: Contract>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            declared_id: T::CONTRACT_ID,
            decode: decode_json::<T>,
        }
    }

    /// The underlying Rust type identity.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully-qualified type name, e.g. `billing::events::InvoicePaid`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Last path segment of the type name with generic arguments stripped.
    pub fn short_name(&self) -> &'static str {
        let base = match self.type_name.find('<') {
            Some(idx) => &self.type_name[..idx],
            None => self.type_name,
        };
        base.rsplit("::").next().unwrap_or(base)
    }

    /// Identifier declared through [`Contract::CONTRACT_ID`].
    pub fn declared_id(&self) -> Option<&'static str> {
        self.declared_id
    }

    /// Whether this descriptor describes `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Decode a JSON body into a boxed instance of this type.
    pub fn decode(&self, body: &[u8]) -> serde_json::Result<Box<dyn Any + Send>> {
        (self.decode)(body)
    }
}

impl PartialEq for ContractType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ContractType {}

impl Hash for ContractType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractType")
            .field("type_name", &self.type_name)
            .field("declared_id", &self.declared_id)
            .finish()
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

fn decode_json<T: Contract>(body: &[u8]) -> serde_json::Result<Box<dyn Any + Send>> {
    let value: T = serde_json::from_slice(body)?;
    Ok(Box::new(value))
}
