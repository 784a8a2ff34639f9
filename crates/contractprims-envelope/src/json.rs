use std::any::Any;
use std::sync::Arc;

use chrono::Utc;
use contractprims_registry::{Contract, ContractRegistry, ContractType};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::config::EnvelopeConfig;
use crate::error::{EnvelopeError, Result};
use crate::message::{Message, MessageProperties, SerializeOptions};
use crate::traits::{MessageDeserializer, MessageSerializer};

/// Media type stamped on bodies produced by [`JsonSerializer`].
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Serializes registered contract values as JSON bodies.
///
/// The body's type must be registered: its derived identifier is stamped on
/// the message as `contract_id` so the receiving side can resolve it.
#[derive(Debug, Clone)]
pub struct JsonSerializer {
    registry: Arc<ContractRegistry>,
    config: EnvelopeConfig,
}

impl JsonSerializer {
    pub fn new(registry: Arc<ContractRegistry>) -> Self {
        Self::with_config(registry, EnvelopeConfig::default())
    }

    pub fn with_config(registry: Arc<ContractRegistry>, config: EnvelopeConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Arc<ContractRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }
}

impl MessageSerializer for JsonSerializer {
    fn serialize<T: Contract>(&self, body: &T, options: SerializeOptions) -> Result<Message> {
        let contract = ContractType::of::<T>();
        let identifier = self.registry.identifier_for(&contract).ok_or(
            EnvelopeError::UnregisteredContract {
                contract: contract.type_name(),
            },
        )?;

        let bound = self.registry.get_registered_contract(&identifier)?;
        if bound != contract {
            return Err(EnvelopeError::ContractMismatch {
                identifier,
                bound: bound.type_name(),
                actual: contract.type_name(),
            });
        }

        let encoded = serde_json::to_vec(body)?;
        check_body_size(encoded.len(), &self.config)?;

        let properties = MessageProperties {
            message_id: Some(
                options
                    .message_id
                    .unwrap_or_else(|| Uuid::new_v4().to_string()),
            ),
            correlation_id: options.correlation_id,
            session_id: options.session_id,
            business_id: options.business_id,
            timestamp: Some(options.timestamp.unwrap_or_else(Utc::now)),
            scheduled_enqueue_time: options.scheduled_enqueue_time,
            contract_id: Some(identifier),
            content_type: Some(JSON_CONTENT_TYPE.to_string()),
            headers: options.headers,
        };

        debug!(
            contract_id = properties.contract_id.as_deref(),
            message_id = properties.message_id.as_deref(),
            size = encoded.len(),
            "serialized message body"
        );

        Ok(Message::new(encoded).with_properties(properties))
    }
}

/// Deserializes JSON bodies into the type their contract identifier is
/// bound to.
#[derive(Debug, Clone)]
pub struct JsonDeserializer {
    registry: Arc<ContractRegistry>,
    config: EnvelopeConfig,
}

impl JsonDeserializer {
    pub fn new(registry: Arc<ContractRegistry>) -> Self {
        Self::with_config(registry, EnvelopeConfig::default())
    }

    pub fn with_config(registry: Arc<ContractRegistry>, config: EnvelopeConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Arc<ContractRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    /// Resolve the contract type a message's body decodes into.
    pub fn resolve(&self, message: &Message) -> Result<ContractType> {
        let identifier = message
            .contract_id()
            .ok_or(EnvelopeError::MissingContractId)?;

        self.registry
            .get_registered_contract(identifier)
            .map_err(|err| {
                debug!(identifier, "received message with unknown contract");
                err.into()
            })
    }

    /// Deserialize into `T`, failing if the message's contract is bound to a
    /// different type.
    pub fn deserialize_as<T: Contract>(&self, message: &Message) -> Result<T> {
        self.check_message(message)?;
        let contract = self.resolve(message)?;
        if !contract.is::<T>() {
            return Err(EnvelopeError::ContractMismatch {
                identifier: message.contract_id().unwrap_or_default().to_string(),
                bound: contract.type_name(),
                actual: std::any::type_name::<T>(),
            });
        }

        Ok(serde_json::from_slice(&message.body)?)
    }

    fn check_message(&self, message: &Message) -> Result<()> {
        if let Some(content_type) = message.properties.content_type.as_deref() {
            if !is_json_content_type(content_type) {
                return Err(EnvelopeError::UnsupportedContentType(
                    content_type.to_string(),
                ));
            }
        }
        check_body_size(message.body_len(), &self.config)
    }
}

impl MessageDeserializer for JsonDeserializer {
    fn deserialize_body(&self, message: &Message) -> Result<Box<dyn Any + Send>> {
        self.check_message(message)?;
        let contract = self.resolve(message)?;
        trace!(
            contract_id = message.contract_id(),
            contract = contract.type_name(),
            "deserializing message body"
        );
        Ok(contract.decode(&message.body)?)
    }
}

fn check_body_size(size: usize, config: &EnvelopeConfig) -> Result<()> {
    if size > config.max_body_size {
        return Err(EnvelopeError::BodyTooLarge {
            size,
            max: config.max_body_size,
        });
    }
    Ok(())
}

// Accepts `application/json` with optional parameters such as charset.
fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|media| media.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
}
