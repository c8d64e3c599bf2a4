//! Inbound server frames.
//!
//! Everything the server sends is one JSON object per text frame. Typed
//! frames carry connection or subscription lifecycle events; frames with no
//! `type` field are channel broadcasts addressed by identifier.

use serde::Deserialize;
use serde_json::Value;

use crate::error::CableError;
use crate::identifier::ChannelIdentifier;

/// Kind discriminator of an inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Connection-level greeting sent once the socket is accepted.
    Welcome,
    /// Server heartbeat; `message` carries an epoch-seconds timestamp.
    Ping,
    /// The server accepted a subscribe command for `identifier`.
    ConfirmSubscription,
    /// The server rejected a subscribe command for `identifier`.
    RejectSubscription,
    /// The server is about to close the connection; see `reason` and
    /// `reconnect`.
    Disconnect,
    /// A channel broadcast, sent without a `type` field.
    #[default]
    Message,
}

/// One decoded inbound frame.
#[derive(Debug, Clone)]
pub struct ServerMessage {
    /// Frame kind; [`MessageKind::Message`] when no `type` field was present.
    pub kind: MessageKind,
    /// Identifier of the subscription this frame addresses, when present.
    pub identifier: Option<ChannelIdentifier>,
    /// Frame body: the broadcast payload for `Message`, the timestamp for
    /// `Ping`.
    pub message: Option<Value>,
    /// Disconnect reason, when the server provided one.
    pub reason: Option<String>,
    /// Whether the server permits reconnecting after a disconnect.
    pub reconnect: Option<bool>,
}

/// Raw serde shape of a frame, before the identifier string is decoded.
#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(rename = "type", default)]
    kind: MessageKind,
    #[serde(default)]
    identifier: Option<String>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    reconnect: Option<bool>,
}

impl ServerMessage {
    /// Decodes one text frame.
    ///
    /// The identifier field, when present, is parsed and re-canonicalized so
    /// it compares equal to locally built [`ChannelIdentifier`]s regardless
    /// of the key order the server rendered.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::Encoding`] if the frame is not a valid JSON
    /// object of the expected shape, and [`CableError::MalformedIdentifier`]
    /// if its identifier field does not hold a channel identifier.
    pub fn from_wire(text: &str) -> Result<Self, CableError> {
        let raw: RawFrame = serde_json::from_str(text)?;
        let identifier = raw
            .identifier
            .map(|raw| ChannelIdentifier::from_wire(&raw))
            .transpose()?;
        Ok(Self {
            kind: raw.kind,
            identifier,
            message: raw.message,
            reason: raw.reason,
            reconnect: raw.reconnect,
        })
    }
}
