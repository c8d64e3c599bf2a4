//! Canonical channel identity.
//!
//! [`ChannelIdentifier`] pairs a channel name with its parameters and
//! renders both into a single canonical JSON string. That string is used
//! verbatim as the `identifier` field of every wire frame, and doubles as
//! the equality/hash key, so a subscription can be deduplicated, stored in a
//! routing table, and matched against inbound frames.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CableError;
use crate::protocol::canonical::{to_canonical_string, value_kind};

/// Identity of a channel + params pair.
///
/// The canonical string is a JSON object containing the `channel` name and
/// every param, with all keys (nested ones included) in lexicographic order.
/// Two identifiers built from the same name and params therefore always
/// produce byte-identical strings, no matter how the param map was put
/// together or which peer rendered it.
///
/// Immutable once constructed. Equality and hashing consider only the
/// canonical string.
#[derive(Debug, Clone)]
pub struct ChannelIdentifier {
    channel: String,
    params: Map<String, Value>,
    canonical: String,
}

impl ChannelIdentifier {
    /// Builds an identifier from a channel name and params.
    ///
    /// `params` may be any `Serialize` value that renders to a JSON object,
    /// or to null for a parameterless channel (`&()` works). A `"channel"`
    /// key inside the params is shadowed by the explicit channel name and
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::NotAnObject`] if the params serialize to a
    /// non-object, non-null value, or [`CableError::Encoding`] if they
    /// cannot be serialized at all.
    pub fn new<P>(channel: impl Into<String>, params: &P) -> Result<Self, CableError>
    where
        P: Serialize + ?Sized,
    {
        let params = match serde_json::to_value(params)? {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => {
                return Err(CableError::NotAnObject {
                    context: "channel params",
                    found: value_kind(&other),
                });
            }
        };
        Self::from_parts(channel.into(), params)
    }

    /// Rebuilds an identifier from the `identifier` string of an inbound
    /// frame.
    ///
    /// The server echoes identifier strings back with whatever key order it
    /// has; re-canonicalizing here guarantees the result compares equal to a
    /// locally built identifier for the same channel + params.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::Encoding`] if `raw` is not valid JSON, or
    /// [`CableError::MalformedIdentifier`] if it is not an object with a
    /// string `channel` field.
    pub fn from_wire(raw: &str) -> Result<Self, CableError> {
        let value: Value = serde_json::from_str(raw)?;
        let Value::Object(mut map) = value else {
            return Err(CableError::MalformedIdentifier("not a JSON object"));
        };
        match map.remove("channel") {
            Some(Value::String(channel)) => Self::from_parts(channel, map),
            Some(_) => Err(CableError::MalformedIdentifier(
                "channel field is not a string",
            )),
            None => Err(CableError::MalformedIdentifier("missing channel field")),
        }
    }

    fn from_parts(channel: String, mut params: Map<String, Value>) -> Result<Self, CableError> {
        params.remove("channel");
        let mut merged = params.clone();
        merged.insert("channel".to_owned(), Value::String(channel.clone()));
        let canonical = to_canonical_string(&Value::Object(merged))?;
        Ok(Self {
            channel,
            params,
            canonical,
        })
    }

    /// Returns the channel name.
    #[must_use]
    pub fn channel_name(&self) -> &str {
        &self.channel
    }

    /// Returns the params, without the `channel` entry.
    #[must_use]
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Returns the canonical string form, as sent on the wire.
    #[must_use]
    pub fn canonical_string(&self) -> &str {
        &self.canonical
    }
}

impl PartialEq for ChannelIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for ChannelIdentifier {}

impl Hash for ChannelIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for ChannelIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}
