//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus is the **transport layer** between the attendance service and its
//! observers. It is intentionally lightweight:
//!
//! - **Transport-agnostic**: works with in-memory channels, websockets, SSE
//!   bridges, message queues, etc.
//! - **At-most-once delivery**: a notice reaches whoever is subscribed at the
//!   moment of publish; disconnected or late observers miss it. No queuing,
//!   no replay, no acknowledgments.
//! - **No persistence**: the attendance log store is the source of truth; the
//!   bus only distributes notifications of already-committed state.
//!
//! Publishers must treat delivery failures as non-fatal: the durable write
//! has already happened by the time a notice is published.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A live subscription to the broadcast channel.
///
/// Each subscription receives a copy of every message published while it is
/// alive (broadcast semantics). Dropping the subscription unsubscribes; the
/// bus prunes the dead sender on its next publish.
///
/// Subscriptions are designed for single-threaded consumption. A typical
/// observer loop:
///
/// ```ignore
/// let sub = bus.subscribe();
/// loop {
///     match sub.recv_timeout(Duration::from_secs(1)) {
///         Ok(notice) => forward(notice),
///         Err(std::sync::mpsc::RecvTimeoutError::Timeout) => continue,
///         Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Domain-agnostic broadcast bus (pub/sub abstraction).
///
/// Sits between the attendance service and connected observers:
///
/// ```text
/// record_scan → log store (append) → bus (publish) → observers
///                                                       ├─ dashboard SSE
///                                                       └─ kiosk screens
/// ```
///
/// Notices are **stored first** (log store), then **published**. If a publish
/// fails the attendance record is still durable; the caller logs and moves on.
///
/// The observer set is mutated concurrently by connect/disconnect and read
/// concurrently by publish, so implementations must be `Send + Sync`. No
/// cross-event ordering is guaranteed between concurrent publishers.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
