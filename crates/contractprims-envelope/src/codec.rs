use std::any::Any;
use std::fmt;
use std::sync::Arc;

use contractprims_registry::{Contract, ContractRegistry};

use crate::config::EnvelopeConfig;
use crate::error::Result;
use crate::json::{JsonDeserializer, JsonSerializer};
use crate::message::{Message, SerializeOptions};
use crate::traits::{MessageAssembler, MessageDeserializer, MessageDisassembler, MessageSerializer};

/// End-to-end codec between contract values and a broker's native records.
///
/// Outbound: value → [`JsonSerializer`] → [`Message`] → assembler → `Raw`.
/// Inbound: `Raw` → disassembler → [`Message`] → [`JsonDeserializer`] → value.
/// Both directions resolve contracts through the same registry.
pub struct ContractCodec<Raw> {
    serializer: JsonSerializer,
    deserializer: JsonDeserializer,
    assembler: Box<dyn MessageAssembler<Raw> + Send + Sync>,
    disassembler: Box<dyn MessageDisassembler<Raw> + Send + Sync>,
}

impl<Raw> ContractCodec<Raw> {
    /// Create a codec with default envelope config.
    pub fn new<A, D>(registry: Arc<ContractRegistry>, assembler: A, disassembler: D) -> Self
    where
        A: MessageAssembler<Raw> + Send + Sync + 'static,
        D: MessageDisassembler<Raw> + Send + Sync + 'static,
    {
        Self::with_config(registry, EnvelopeConfig::default(), assembler, disassembler)
    }

    /// Create a codec with explicit envelope config.
    pub fn with_config<A, D>(
        registry: Arc<ContractRegistry>,
        config: EnvelopeConfig,
        assembler: A,
        disassembler: D,
    ) -> Self
    where
        A: MessageAssembler<Raw> + Send + Sync + 'static,
        D: MessageDisassembler<Raw> + Send + Sync + 'static,
    {
        Self {
            serializer: JsonSerializer::with_config(Arc::clone(&registry), config),
            deserializer: JsonDeserializer::with_config(registry, config),
            assembler: Box::new(assembler),
            disassembler: Box::new(disassembler),
        }
    }

    /// Serialize `body` and assemble it into a native record.
    pub fn encode<T: Contract>(&self, body: &T, options: SerializeOptions) -> Result<Raw> {
        let message = self.serializer.serialize(body, options)?;
        self.assembler.assemble(message)
    }

    /// Disassemble a native record into its envelope without decoding the
    /// body.
    pub fn open(&self, raw: Raw) -> Result<Message> {
        self.disassembler.disassemble(raw)
    }

    /// Disassemble a native record and decode its body into the bound type.
    pub fn decode(&self, raw: Raw) -> Result<Box<dyn Any + Send>> {
        let message = self.open(raw)?;
        self.deserializer.deserialize_body(&message)
    }

    /// Disassemble a native record and decode its body as `T`.
    pub fn decode_as<T: Contract>(&self, raw: Raw) -> Result<T> {
        let message = self.open(raw)?;
        self.deserializer.deserialize_as(&message)
    }

    /// The registry both directions resolve contracts through.
    pub fn registry(&self) -> &Arc<ContractRegistry> {
        self.serializer.registry()
    }
}

impl<Raw> fmt::Debug for ContractCodec<Raw> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractCodec")
            .field("serializer", &self.serializer)
            .field("deserializer", &self.deserializer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use bytes::Bytes;
    use contractprims_registry::derive;
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::error::EnvelopeError;
    use crate::message::MessageProperties;

    /// Stand-in for a broker record: string headers plus an opaque payload.
    #[derive(Debug, Clone)]
    struct Record {
        headers: BTreeMap<String, String>,
        payload: Vec<u8>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Heartbeat {
        node: String,
        seq: u32,
    }
    impl Contract for Heartbeat {
        const CONTRACT_ID: Option<&'static str> = Some("ops.heartbeat.v1");
    }

    fn to_record(message: Message) -> Result<Record> {
        let properties = serde_json::to_string(&message.properties)?;
        let mut headers = BTreeMap::new();
        headers.insert("x-properties".to_string(), properties);
        Ok(Record {
            headers,
            payload: message.body.to_vec(),
        })
    }

    fn from_record(record: Record) -> Result<Message> {
        let properties = record
            .headers
            .get("x-properties")
            .ok_or_else(|| EnvelopeError::Assembly("missing x-properties header".into()))?;
        let properties: MessageProperties = serde_json::from_str(properties)?;
        Ok(Message::new(Bytes::from(record.payload)).with_properties(properties))
    }

    fn codec() -> ContractCodec<Record> {
        let registry = ContractRegistry::new(derive::declared_id);
        registry.register::<Heartbeat>().unwrap();
        ContractCodec::new(Arc::new(registry), to_record, from_record)
    }

    #[test]
    fn encode_then_decode_through_record() {
        let codec = codec();
        let heartbeat = Heartbeat {
            node: "n1".to_string(),
            seq: 4,
        };

        let record = codec
            .encode(&heartbeat, SerializeOptions::new().session_id("s-1"))
            .unwrap();
        assert!(record.headers["x-properties"].contains("ops.heartbeat.v1"));

        let opened = codec.open(record.clone()).unwrap();
        assert_eq!(opened.properties.session_id.as_deref(), Some("s-1"));

        let decoded = codec.decode(record.clone()).unwrap();
        assert_eq!(*decoded.downcast::<Heartbeat>().unwrap(), heartbeat);
        assert_eq!(codec.decode_as::<Heartbeat>(record).unwrap(), heartbeat);
    }

    #[test]
    fn disassembly_failure_surfaces() {
        let codec = codec();
        let record = Record {
            headers: BTreeMap::new(),
            payload: b"{}".to_vec(),
        };
        assert!(matches!(codec.decode(record), Err(EnvelopeError::Assembly(_))));
    }

    #[test]
    fn codec_exposes_shared_registry() {
        let codec = codec();
        assert!(codec.registry().is_contract_registered("ops.heartbeat.v1"));
        assert!(format!("{codec:?}").starts_with("ContractCodec"));
    }
}
