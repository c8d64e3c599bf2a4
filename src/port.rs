//! Transport hand-off seam between subscriptions and the owning client.

/// Callback invoked once the transport has accepted a frame.
pub type SentCallback = Box<dyn FnOnce() + Send>;

/// Outbound capability a subscription borrows from its owning client.
///
/// Implementations queue the frame for transmission on the shared
/// connection and invoke `on_sent` once the transport has accepted it.
/// Hand-off is the only signal available: the protocol has no
/// command-level acknowledgments, so `on_sent` never implies the server
/// received or processed anything.
///
/// Subscriptions call [`ClientSendPort::send`] from their own worker
/// tasks, so implementations must tolerate concurrent callers and must
/// preserve the relative order of frames handed over by any single
/// caller. Connection state is the implementor's policy: whether frames
/// sent while the socket is down are buffered or dropped is decided here,
/// not by the subscription.
pub trait ClientSendPort: Send + Sync {
    /// Queues one serialized text frame for transmission.
    fn send(&self, frame: String, on_sent: Option<SentCallback>);
}
