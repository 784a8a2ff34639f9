//! Message envelopes and pluggable contract serialization.
//!
//! A [`Message`] is a broker-neutral envelope: body bytes plus routing
//! metadata. Payloads move in and out of envelopes through four single-call
//! seams:
//! - [`MessageSerializer`] turns a contract value into a `Message`
//! - [`MessageDeserializer`] turns a `Message` back into a value
//! - [`MessageAssembler`] maps a `Message` onto a broker's native record
//! - [`MessageDisassembler`] maps a native record back to a `Message`
//!
//! The JSON implementations resolve the type to decode into through a shared
//! [`ContractRegistry`](contractprims_registry::ContractRegistry).

pub mod codec;
pub mod config;
pub mod error;
pub mod json;
pub mod message;
pub mod traits;

pub use codec::ContractCodec;
pub use config::{EnvelopeConfig, DEFAULT_MAX_BODY_SIZE};
pub use error::{EnvelopeError, Result};
pub use json::{JsonDeserializer, JsonSerializer, JSON_CONTENT_TYPE};
pub use message::{Message, MessageProperties, SerializeOptions};
pub use traits::{MessageAssembler, MessageDeserializer, MessageDisassembler, MessageSerializer};
