//! The subscription primitive: ordered sends and inbound dispatch.
//!
//! A [`Subscription`] binds one [`ChannelIdentifier`] to a message handler
//! and an outbound pipeline. Each subscription owns a private worker task
//! fed by an unbounded queue: [`Subscription::send`] enqueues and returns
//! immediately, while the worker encodes and hands frames to the client's
//! [`ClientSendPort`] one at a time. Two frames sent on the same
//! subscription therefore reach the client in exactly the order `send` was
//! called; sends on different subscriptions may interleave freely.
//!
//! The port reference is non-owning ([`Weak`]): the client owns the
//! subscription's lifetime, never the reverse. A send issued after the
//! client is gone reports [`CableError::PortGone`] instead of reaching a
//! dead transport.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Weak;

use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::mpsc;

use crate::error::CableError;
use crate::identifier::ChannelIdentifier;
use crate::port::ClientSendPort;
use crate::protocol::canonical::value_kind;
use crate::protocol::command::Command;
use crate::protocol::message::ServerMessage;

/// Handler invoked for every inbound message routed to a subscription.
pub type MessageHandler = Box<dyn Fn(ServerMessage) + Send + Sync>;

/// Callback receiving the outcome of a single send.
pub type SendCompletion = Box<dyn FnOnce(Result<(), CableError>) + Send>;

/// One queued perform-action request.
///
/// Payload conversion happens at the `send` call site so the caller's data
/// does not need to be `'static`; a conversion failure rides the queue as
/// `Err` and is reported through the completion in order, like any other
/// outcome.
struct SendJob {
    action: String,
    payload: Result<Option<Map<String, Value>>, CableError>,
    completion: Option<SendCompletion>,
}

/// Client-side handle for one active channel subscription.
pub struct Subscription {
    identifier: ChannelIdentifier,
    handler: MessageHandler,
    queue: mpsc::UnboundedSender<SendJob>,
}

impl Subscription {
    /// Creates a subscription bound to `identifier`, dispatching inbound
    /// messages to `on_message` and sending commands through `port`.
    ///
    /// Spawns the subscription's send worker onto the current Tokio
    /// runtime. The worker stops when the subscription is dropped.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn new<F>(
        port: Weak<dyn ClientSendPort>,
        identifier: ChannelIdentifier,
        on_message: F,
    ) -> Self
    where
        F: Fn(ServerMessage) + Send + Sync + 'static,
    {
        let (queue, jobs) = mpsc::unbounded_channel();
        spawn_send_worker(identifier.clone(), port, jobs);
        Self {
            identifier,
            handler: Box::new(on_message),
            queue,
        }
    }

    /// Returns this subscription's identifier.
    #[must_use]
    pub fn identifier(&self) -> &ChannelIdentifier {
        &self.identifier
    }

    /// Queues a perform-action command and returns immediately.
    ///
    /// `data` may be any `Serialize` value rendering to a JSON object, or
    /// to null for an action-only command (`&()` works). Encoding and
    /// hand-off happen later on the subscription's worker, in call order.
    /// Failures are logged; use [`Subscription::send_with`] to observe
    /// them.
    pub fn send<T>(&self, action: impl Into<String>, data: &T)
    where
        T: Serialize + ?Sized,
    {
        self.enqueue(action.into(), to_payload(data), None);
    }

    /// Like [`Subscription::send`], with a completion callback.
    ///
    /// The completion fires exactly once. Errors (encoding failure, no
    /// client left to send through) complete on the subscription's worker,
    /// in queue order. `Ok(())` completes once the transport has accepted
    /// the frame (not an acknowledgment; the protocol has none), on
    /// whatever thread the port invokes `on_sent` from. A port that defers
    /// acceptance defers the success completion with it, so no ordering is
    /// guaranteed between error and success completions. Frames themselves
    /// are always handed to the port in call order.
    pub fn send_with<T, F>(&self, action: impl Into<String>, data: &T, completion: F)
    where
        T: Serialize + ?Sized,
        F: FnOnce(Result<(), CableError>) + Send + 'static,
    {
        self.enqueue(action.into(), to_payload(data), Some(Box::new(completion)));
    }

    /// Delivers one inbound message to the registered handler.
    ///
    /// Called by the owning client after routing a decoded frame here. The
    /// handler runs synchronously on the caller's task, once per message,
    /// in arrival order.
    pub fn dispatch(&self, message: ServerMessage) {
        (self.handler)(message);
    }

    fn enqueue(
        &self,
        action: String,
        payload: Result<Option<Map<String, Value>>, CableError>,
        completion: Option<SendCompletion>,
    ) {
        let job = SendJob {
            action,
            payload,
            completion,
        };
        if let Err(mpsc::error::SendError(job)) = self.queue.send(job) {
            tracing::warn!(identifier = %self.identifier, "send worker is gone; dropping command");
            if let Some(completion) = job.completion {
                completion(Err(CableError::QueueClosed));
            }
        }
    }
}

impl PartialEq for Subscription {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Subscription {}

impl Hash for Subscription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

/// Converts caller data into the inner payload map.
fn to_payload<T>(data: &T) -> Result<Option<Map<String, Value>>, CableError>
where
    T: Serialize + ?Sized,
{
    match serde_json::to_value(data) {
        Ok(Value::Null) => Ok(None),
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(other) => Err(CableError::NotAnObject {
            context: "action payload",
            found: value_kind(&other),
        }),
        Err(e) => Err(CableError::Encoding(e)),
    }
}

/// Spawns a subscription's private send worker: one job at a time, in
/// submission order, until the owning subscription is dropped.
fn spawn_send_worker(
    identifier: ChannelIdentifier,
    port: Weak<dyn ClientSendPort>,
    mut jobs: mpsc::UnboundedReceiver<SendJob>,
) {
    tokio::spawn(async move {
        while let Some(job) = jobs.recv().await {
            run_job(&identifier, &port, job);
        }
        tracing::debug!(identifier = %identifier, "send worker stopped");
    });
}

fn run_job(identifier: &ChannelIdentifier, port: &Weak<dyn ClientSendPort>, job: SendJob) {
    let SendJob {
        action,
        payload,
        completion,
    } = job;
    let frame =
        payload.and_then(|data| Command::message(identifier.clone(), action, data).to_wire());
    let frame = match frame {
        Ok(frame) => frame,
        Err(e) => {
            tracing::error!(identifier = %identifier, error = %e, "failed to encode command");
            if let Some(completion) = completion {
                completion(Err(e));
            }
            return;
        }
    };
    let Some(port) = port.upgrade() else {
        tracing::warn!(identifier = %identifier, "client is gone; dropping command");
        if let Some(completion) = completion {
            completion(Err(CableError::PortGone));
        }
        return;
    };
    match completion {
        Some(completion) => port.send(frame, Some(Box::new(move || completion(Ok(()))))),
        None => port.send(frame, None),
    }
}
