use tokio::sync::mpsc;

use crate::SEND_BUFFER_SIZE;

/// Handle for pushing serialized events to one subscriber.
///
/// Cloneable and cheap — wraps an `mpsc::Sender`. The registry holds
/// the authoritative clone; dropping that clone closes the channel and
/// ends the subscriber's write pump.
#[derive(Clone)]
pub struct SubscriberSender {
    tx: mpsc::Sender<String>,
}

impl SubscriberSender {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }

    /// Queues one text frame without waiting.
    ///
    /// Fails when the pump is gone or the buffer is full — both are
    /// treated as a dead subscriber by the registry.
    pub fn send(&self, frame: impl Into<String>) -> Result<(), SendError> {
        self.tx.try_send(frame.into()).map_err(|_| SendError)
    }

    /// Returns `true` if the receiving pump still exists.
    pub fn is_connected(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Returns `true` if both handles belong to the same channel.
    pub fn same_channel(&self, other: &Self) -> bool {
        self.tx.same_channel(&other.tx)
    }

    /// Returns a handle that does not keep the channel open.
    ///
    /// A session holds this while the registry holds the strong
    /// sender; when the registry drops its sender (unregister or
    /// reconnect) the channel closes even though the session is still
    /// around.
    pub fn downgrade(&self) -> WeakSubscriberSender {
        WeakSubscriberSender {
            weak: self.tx.downgrade(),
        }
    }
}

/// Non-owning handle to a subscriber channel.
#[derive(Clone)]
pub struct WeakSubscriberSender {
    weak: tokio::sync::mpsc::WeakSender<String>,
}

impl WeakSubscriberSender {
    /// Recovers a strong sender if the channel is still open.
    pub fn upgrade(&self) -> Option<SubscriberSender> {
        self.weak.upgrade().map(SubscriberSender::new)
    }
}

/// Error returned when the send buffer is full or the channel closed.
#[derive(Debug, thiserror::Error)]
#[error("send failed: buffer full or subscriber disconnected")]
pub struct SendError;

/// Creates a subscriber channel pair with the standard buffer size.
///
/// The sender goes to the registry; the receiver goes to the
/// transport's write pump.
pub fn subscriber_channel() -> (SubscriberSender, mpsc::Receiver<String>) {
    let (tx, rx) = mpsc::channel(SEND_BUFFER_SIZE);
    (SubscriberSender::new(tx), rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_frame() {
        let (sender, mut rx) = subscriber_channel();
        sender.send("hello").unwrap();
        assert_eq!(rx.recv().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn send_fails_after_receiver_dropped() {
        let (sender, rx) = subscriber_channel();
        drop(rx);
        assert!(!sender.is_connected());
        assert!(sender.send("lost").is_err());
    }

    #[tokio::test]
    async fn send_fails_when_buffer_full() {
        let (tx, _rx) = tokio::sync::mpsc::channel(1);
        let sender = SubscriberSender::new(tx);
        sender.send("first").unwrap();
        assert!(sender.send("second").is_err());
        // Still connected — the pump exists, it just isn't draining.
        assert!(sender.is_connected());
    }

    #[tokio::test]
    async fn weak_handle_does_not_keep_channel_open() {
        let (sender, mut rx) = subscriber_channel();
        let weak = sender.downgrade();

        // Strong sender alive: upgrade works.
        assert!(weak.upgrade().is_some());

        // Last strong sender gone: channel closes despite the weak
        // handle, and upgrade fails.
        drop(sender);
        assert!(rx.recv().await.is_none());
        assert!(weak.upgrade().is_none());
    }

    #[tokio::test]
    async fn same_channel_distinguishes_pairs() {
        let (a, _rx_a) = subscriber_channel();
        let (b, _rx_b) = subscriber_channel();
        assert!(a.same_channel(&a.clone()));
        assert!(!a.same_channel(&b));
    }
}
