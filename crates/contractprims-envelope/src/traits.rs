use std::any::Any;

use contractprims_registry::Contract;

use crate::error::Result;
use crate::message::{Message, SerializeOptions};

/// Turns a contract value into an envelope.
pub trait MessageSerializer {
    /// Serialize `body`, applying the optional metadata in `options`.
    fn serialize<T: Contract>(&self, body: &T, options: SerializeOptions) -> Result<Message>;
}

/// Turns an envelope back into the value it carries.
pub trait MessageDeserializer {
    /// Deserialize the body into the type its contract resolves to.
    fn deserialize_body(&self, message: &Message) -> Result<Box<dyn Any + Send>>;
}

/// Maps an envelope onto a broker's native record type.
pub trait MessageAssembler<Raw> {
    fn assemble(&self, message: Message) -> Result<Raw>;
}

/// Maps a broker's native record back to an envelope.
pub trait MessageDisassembler<Raw> {
    fn disassemble(&self, raw: Raw) -> Result<Message>;
}

impl<Raw, F> MessageAssembler<Raw> for F
where
    F: Fn(Message) -> Result<Raw>,
{
    fn assemble(&self, message: Message) -> Result<Raw> {
        self(message)
    }
}

impl<Raw, F> MessageDisassembler<Raw> for F
where
    F: Fn(Raw) -> Result<Message>,
{
    fn disassemble(&self, raw: Raw) -> Result<Message> {
        self(raw)
    }
}
