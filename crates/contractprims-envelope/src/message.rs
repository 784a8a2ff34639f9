use std::collections::BTreeMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Broker-neutral routing metadata carried alongside a body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageProperties {
    /// Unique identifier of this message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Identifier of the message this one responds to or continues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// Session used for ordered delivery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Application-level business key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,
    /// When the message was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Earliest time the broker should make the message visible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_enqueue_time: Option<DateTime<Utc>>,
    /// Wire-level contract identifier of the body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
    /// Media type of the body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Free-form application headers.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

/// An envelope: body bytes plus properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// The serialized payload.
    pub body: Bytes,
    /// Routing metadata.
    pub properties: MessageProperties,
}

impl Message {
    /// Create a message with empty properties.
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            properties: MessageProperties::default(),
        }
    }

    /// Replace the message properties.
    pub fn with_properties(mut self, properties: MessageProperties) -> Self {
        self.properties = properties;
        self
    }

    /// The contract identifier, if set and not blank.
    pub fn contract_id(&self) -> Option<&str> {
        self.properties
            .contract_id
            .as_deref()
            .filter(|identifier| !identifier.trim().is_empty())
    }

    /// Body length in bytes.
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

/// Optional metadata accepted when serializing a body.
///
/// Unset values are left to the serializer, which may fill defaults (a fresh
/// message id, the current time).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    pub message_id: Option<String>,
    pub correlation_id: Option<String>,
    pub session_id: Option<String>,
    pub business_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub scheduled_enqueue_time: Option<DateTime<Utc>>,
    pub headers: BTreeMap<String, String>,
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    pub fn correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn business_id(mut self, business_id: impl Into<String>) -> Self {
        self.business_id = Some(business_id.into());
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn scheduled_enqueue_time(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_enqueue_time = Some(at);
        self
    }

    /// Add an application header. A later value for the same name wins.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}
