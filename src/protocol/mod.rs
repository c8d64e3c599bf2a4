//! Wire protocol layer.
//!
//! Everything on the wire is one JSON object per text frame. Outbound
//! frames (see [`command`]) carry a `command` name, a canonical identifier
//! string, and, for perform-action commands, a double-encoded `data`
//! payload. Inbound frames (see [`message`]) carry a `type` discriminator,
//! or none at all for channel broadcasts.

pub(crate) mod canonical;
pub mod command;
pub mod message;

pub use command::{Command, CommandKind};
pub use message::{MessageKind, ServerMessage};
