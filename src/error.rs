//! Error types for the subscription pipeline.
//!
//! [`CableError`] is the central error type for the crate. Every failure a
//! `send` can hit surfaces through the send completion as one of these
//! variants, never as a panic and never as a silent drop.

/// Failure raised while building, encoding, or handing off a command.
///
/// Serialization failures are recovered locally at the encoding boundary and
/// delivered through the send completion path; transport-level failures
/// (connection down, write errors) belong to the client collaborator and do
/// not appear here.
#[derive(Debug, thiserror::Error)]
pub enum CableError {
    /// A payload or params value could not be rendered as JSON (for example
    /// a failing `Serialize` impl or a map with non-string keys).
    #[error("encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Channel params or an action payload serialized to something other
    /// than a JSON object or null.
    #[error("{context} must serialize to a JSON object, got {found}")]
    NotAnObject {
        /// What was being encoded (`"channel params"` or `"action payload"`).
        context: &'static str,
        /// JSON type that was actually produced.
        found: &'static str,
    },

    /// A `message` command was built without an action name.
    ///
    /// Unreachable through [`Subscription::send`](crate::Subscription::send);
    /// only a hand-constructed [`Command`](crate::protocol::Command) can
    /// trigger it.
    #[error("message command requires an action name")]
    MissingAction,

    /// An identifier string received from the server was not a JSON object
    /// with a string `channel` field.
    #[error("malformed channel identifier: {0}")]
    MalformedIdentifier(&'static str),

    /// The client send port was dropped before the command could be handed
    /// off: the subscription outlived its owning client.
    #[error("client send port is gone")]
    PortGone,

    /// The subscription's send worker is no longer accepting commands.
    /// Only possible once the async runtime is shutting down.
    #[error("subscription command queue is closed")]
    QueueClosed,
}
