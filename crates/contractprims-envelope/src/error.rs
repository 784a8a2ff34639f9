use contractprims_registry::RegistryError;

/// Errors that can occur while moving payloads in and out of envelopes.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// Contract resolution failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The body could not be encoded or decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The message carries no contract identifier.
    #[error("message has no contract identifier")]
    MissingContractId,

    /// No identifier can be derived for the payload type.
    #[error("no contract identifier can be derived for {contract}")]
    UnregisteredContract { contract: &'static str },

    /// The identifier is bound to a different type than the one in hand.
    #[error("contract '{identifier}' is bound to {bound}, not {actual}")]
    ContractMismatch {
        identifier: String,
        bound: &'static str,
        actual: &'static str,
    },

    /// The body exceeds the configured maximum size.
    #[error("body too large ({size} bytes, max {max})")]
    BodyTooLarge { size: usize, max: usize },

    /// The message body is in a format this deserializer does not read.
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// A broker-specific assembler or disassembler failed.
    #[error("assembly failed: {0}")]
    Assembly(String),
}

pub type Result<T> = std::result::Result<T, EnvelopeError>;
