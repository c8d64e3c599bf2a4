//! # cable-client
//!
//! Client-side subscription primitives for the Action Cable WebSocket
//! protocol.
//!
//! This crate models one subscription to one server-side channel: its
//! identity, its outbound perform-action commands, and the dispatch of
//! inbound messages to a handler. All connection management (sockets,
//! handshakes, reconnects) is delegated to the embedding client — this
//! crate is the subscription layer, plugged into the client through the
//! [`port::ClientSendPort`] trait.
//!
//! Sends on one subscription never block the caller and reach the client
//! in call order; the double-encoded wire format and canonical identifier
//! rendering live in [`protocol`].
//!
//! ## Architecture
//!
//! ```text
//! Caller (send / send_with)
//!     │
//!     ├── Subscription (subscription)
//!     │       unbounded queue → private send worker
//!     │
//!     ├── ChannelIdentifier (identifier)
//!     ├── Command / ServerMessage (protocol)
//!     │
//!     └── ClientSendPort (port) → owning client → WebSocket
//! ```

pub mod error;
pub mod identifier;
pub mod port;
pub mod protocol;
pub mod subscription;

pub use error::CableError;
pub use identifier::ChannelIdentifier;
pub use port::{ClientSendPort, SentCallback};
pub use protocol::{Command, CommandKind, MessageKind, ServerMessage};
pub use subscription::{MessageHandler, SendCompletion, Subscription};
