use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::subscriber::SubscriberSender;

/// Thread-safe map of subscriber id → outbound channel.
///
/// The lock guards map structure only: broadcast snapshots the senders
/// and performs the actual sends outside the lock, so a slow subscriber
/// never blocks registration or removal.
#[derive(Default)]
pub struct SubscriberRegistry {
    subscribers: Mutex<HashMap<String, SubscriberSender>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscriber, replacing any existing entry with the same id.
    ///
    /// Replacement is reconnect semantics: the registry drops its handle
    /// to the superseded channel, which closes it (the registry holds
    /// the only sender).
    pub async fn register(&self, id: impl Into<String>, sender: SubscriberSender) {
        let id = id.into();
        let replaced = self.subscribers.lock().await.insert(id.clone(), sender);
        if replaced.is_some() {
            tracing::info!(id = %id, "subscriber reconnected, superseding previous channel");
        } else {
            tracing::debug!(id = %id, "subscriber registered");
        }
    }

    /// Removes a subscriber if present. Safe to call concurrently with
    /// broadcast; removing an unknown id is a no-op.
    pub async fn unregister(&self, id: &str) -> bool {
        let removed = self.subscribers.lock().await.remove(id).is_some();
        if removed {
            tracing::debug!(id = %id, "subscriber unregistered");
        }
        removed
    }

    /// Removes `id` only if it is still bound to `channel`.
    ///
    /// Connection teardown uses this instead of [`unregister`] so that
    /// a session superseded by a reconnect cannot evict its
    /// replacement.
    ///
    /// [`unregister`]: SubscriberRegistry::unregister
    pub async fn unregister_channel(&self, id: &str, channel: &SubscriberSender) -> bool {
        let mut subscribers = self.subscribers.lock().await;
        if subscribers
            .get(id)
            .is_some_and(|current| current.same_channel(channel))
        {
            subscribers.remove(id);
            tracing::debug!(id = %id, "subscriber unregistered");
            true
        } else {
            false
        }
    }

    /// Delivers one serialized frame to every live subscriber.
    ///
    /// Best effort, at most once per subscriber: a failed send skips
    /// that subscriber, removes it, and never blocks the others.
    /// Returns the number of successful deliveries.
    pub async fn broadcast(&self, frame: &str) -> usize {
        let snapshot: Vec<(String, SubscriberSender)> = {
            let subscribers = self.subscribers.lock().await;
            subscribers
                .iter()
                .map(|(id, sender)| (id.clone(), sender.clone()))
                .collect()
        };

        let mut delivered = 0;
        let mut stale: Vec<(String, SubscriberSender)> = Vec::new();

        for (id, sender) in snapshot {
            match sender.send(frame) {
                Ok(()) => delivered += 1,
                Err(_) => {
                    tracing::debug!(id = %id, "dropping unreachable subscriber");
                    stale.push((id, sender));
                }
            }
        }

        if !stale.is_empty() {
            let mut subscribers = self.subscribers.lock().await;
            for (id, failed) in stale {
                // Only remove the channel that actually failed; the id
                // may have re-registered while we were sending.
                if subscribers
                    .get(&id)
                    .is_some_and(|current| current.same_channel(&failed))
                {
                    subscribers.remove(&id);
                }
            }
        }

        delivered
    }

    /// Number of currently registered subscribers.
    pub async fn len(&self) -> usize {
        self.subscribers.lock().await.len()
    }

    /// Returns `true` if no subscribers are registered.
    pub async fn is_empty(&self) -> bool {
        self.subscribers.lock().await.is_empty()
    }

    /// Returns `true` if `id` is currently registered.
    pub async fn contains(&self, id: &str) -> bool {
        self.subscribers.lock().await.contains_key(id)
    }
}
