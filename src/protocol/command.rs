//! Outbound commands and their wire encoding.
//!
//! A [`Command`] is transient: built for one send, encoded by
//! [`Command::to_wire`], and discarded. Subscribe/unsubscribe lifecycle
//! commands are built by the owning client; perform-action commands are
//! built by the subscription's send worker.

use serde::Serialize;
use serde_json::{Map, Value};

use super::canonical::to_canonical_string;
use crate::error::CableError;
use crate::identifier::ChannelIdentifier;

/// Client → server command kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Open a subscription for an identifier.
    Subscribe,
    /// Close the subscription for an identifier.
    Unsubscribe,
    /// Invoke a channel action over an active subscription.
    Message,
}

/// One outbound command: kind, target identifier, and (for perform-action
/// commands) an action name plus optional payload.
#[derive(Debug, Clone)]
pub struct Command {
    kind: CommandKind,
    identifier: ChannelIdentifier,
    action: Option<String>,
    data: Option<Map<String, Value>>,
}

impl Command {
    /// Builds a command from raw parts.
    ///
    /// Prefer [`Command::subscribe`], [`Command::unsubscribe`], and
    /// [`Command::message`]; this constructor exists for callers driving
    /// the protocol generically. Action and payload are ignored for
    /// subscribe/unsubscribe kinds.
    #[must_use]
    pub fn new(
        kind: CommandKind,
        identifier: ChannelIdentifier,
        action: Option<String>,
        data: Option<Map<String, Value>>,
    ) -> Self {
        Self {
            kind,
            identifier,
            action,
            data,
        }
    }

    /// Subscribe command for `identifier`.
    #[must_use]
    pub fn subscribe(identifier: ChannelIdentifier) -> Self {
        Self::new(CommandKind::Subscribe, identifier, None, None)
    }

    /// Unsubscribe command for `identifier`.
    #[must_use]
    pub fn unsubscribe(identifier: ChannelIdentifier) -> Self {
        Self::new(CommandKind::Unsubscribe, identifier, None, None)
    }

    /// Perform-action command carrying `action` and an optional payload.
    #[must_use]
    pub fn message(
        identifier: ChannelIdentifier,
        action: impl Into<String>,
        data: Option<Map<String, Value>>,
    ) -> Self {
        Self::new(CommandKind::Message, identifier, Some(action.into()), data)
    }

    /// Returns the command kind.
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Returns the target identifier.
    #[must_use]
    pub fn identifier(&self) -> &ChannelIdentifier {
        &self.identifier
    }

    /// Encodes the command as one text frame.
    ///
    /// The frame is a JSON object with a `command` field, the identifier's
    /// canonical string as `identifier`, and, for perform-action commands
    /// only, a `data` field holding the canonical JSON string of
    /// `{"action": ..., ...payload}`. The inner payload is itself a string
    /// (double-encoded), per the Action Cable convention. An `action` key
    /// inside the payload is overridden by the command's action name.
    ///
    /// Pure: same command, same bytes, no I/O.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::MissingAction`] for a perform-action command
    /// built without an action name, or [`CableError::Encoding`] if a
    /// payload value cannot be rendered.
    pub fn to_wire(&self) -> Result<String, CableError> {
        let data = match self.kind {
            CommandKind::Subscribe | CommandKind::Unsubscribe => None,
            CommandKind::Message => Some(self.encode_data()?),
        };
        let frame = WireFrame {
            command: self.kind,
            identifier: self.identifier.canonical_string(),
            data,
        };
        Ok(serde_json::to_string(&frame)?)
    }

    fn encode_data(&self) -> Result<String, CableError> {
        let Some(action) = &self.action else {
            return Err(CableError::MissingAction);
        };
        let mut inner = self.data.clone().unwrap_or_default();
        inner.insert("action".to_owned(), Value::String(action.clone()));
        to_canonical_string(&Value::Object(inner))
    }
}

/// Field layout of an outbound frame.
#[derive(Serialize)]
struct WireFrame<'a> {
    command: CommandKind,
    identifier: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}
