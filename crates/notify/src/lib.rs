//! Upload-completion fan-out.
//!
//! A subscriber is an id plus an outbound channel of serialized text
//! frames; the transport layer owns the actual socket and drains the
//! channel from its write pump. The registry is the single piece of
//! shared mutable state in the service and encapsulates its own
//! locking; nothing outside this crate touches the map.

mod bridge;
mod registry;
mod subscriber;

pub use bridge::NotificationBridge;
pub use registry::SubscriberRegistry;
pub use subscriber::{subscriber_channel, SendError, SubscriberSender, WeakSubscriberSender};

/// Outbound buffer capacity per subscriber.
///
/// Completion events are small and infrequent; the buffer only fills
/// when a client has stopped draining its socket, at which point the
/// subscriber is dropped rather than queued behind.
pub const SEND_BUFFER_SIZE: usize = 64;
