use azservicebus::ServiceBusReceivedMessage;
use azure_core::time::OffsetDateTime;
use serde::Serialize;
use serde::ser::Serializer;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// A message received from a session-enabled queue.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct SessionMessageModel {
    pub sequence: i64,
    pub id: String,
    pub session_id: Option<String>,
    #[serde(with = "azure_core::time::iso8601")]
    pub enqueued_at: OffsetDateTime,
    pub delivery_count: u32,
    pub body: BodyData,
}

/// Message payload: parsed JSON when it is JSON, otherwise the text as sent.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyData {
    ValidJson(Value),
    RawString(String),
}

impl BodyData {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => BodyData::ValidJson(value),
            Err(_) => BodyData::RawString(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

impl fmt::Display for BodyData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyData::ValidJson(value) => write!(f, "{value}"),
            BodyData::RawString(s) => f.write_str(s),
        }
    }
}

impl Serialize for BodyData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            BodyData::ValidJson(value) => value.serialize(serializer),
            BodyData::RawString(s) => serializer.serialize_str(s),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageModelError {
    #[error("Message has no message id")]
    MissingMessageId,
    #[error("Message has no body")]
    MissingMessageBody,
}

impl TryFrom<&ServiceBusReceivedMessage> for SessionMessageModel {
    type Error = MessageModelError;

    fn try_from(msg: &ServiceBusReceivedMessage) -> Result<Self, Self::Error> {
        let id = msg
            .message_id()
            .ok_or(MessageModelError::MissingMessageId)?
            .to_string();
        let body = msg
            .body()
            .map(BodyData::from_bytes)
            .map_err(|_| MessageModelError::MissingMessageBody)?;

        Ok(Self {
            sequence: msg.sequence_number(),
            id,
            session_id: msg.session_id().map(|s| s.to_string()),
            enqueued_at: msg.enqueued_time(),
            delivery_count: msg.delivery_count().unwrap_or_default(),
            body,
        })
    }
}

impl SessionMessageModel {
    /// Convert a batch, skipping (and logging) messages that cannot be converted.
    pub fn convert_all(messages: &[ServiceBusReceivedMessage]) -> Vec<SessionMessageModel> {
        messages
            .iter()
            .filter_map(|msg| match SessionMessageModel::try_from(msg) {
                Ok(model) => Some(model),
                Err(e) => {
                    log::warn!(
                        "Skipping message with sequence #{}: {}",
                        msg.sequence_number(),
                        e
                    );
                    None
                }
            })
            .collect()
    }
}
