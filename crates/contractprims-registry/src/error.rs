/// Errors that can occur while registering or resolving contracts.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A required argument was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The identifier is already bound to a different type.
    #[error(
        "contract identifier '{identifier}' is already registered to {existing}; \
         refusing to register {attempted}"
    )]
    ContractConflict {
        identifier: String,
        existing: &'static str,
        attempted: &'static str,
    },

    /// No type is bound to the identifier.
    #[error("no contract registered for identifier '{identifier}'")]
    ContractNotFound { identifier: String },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
