use std::sync::Arc;

use filedrop_protocol::UploadCompletedEvent;

use crate::registry::SubscriberRegistry;

/// Connects the upload success path to the subscriber fan-out.
///
/// Fires only for durably stored files; delivery problems are a
/// subscriber-side concern and never propagate back to the uploader.
#[derive(Clone)]
pub struct NotificationBridge {
    registry: Arc<SubscriberRegistry>,
}

impl NotificationBridge {
    pub fn new(registry: Arc<SubscriberRegistry>) -> Self {
        Self { registry }
    }

    /// Broadcasts a completion event for a stored file.
    pub async fn upload_completed(&self, file_name: &str, file_size: u64) {
        let event = UploadCompletedEvent::new(file_name, file_size);
        match serde_json::to_string(&event) {
            Ok(frame) => {
                let delivered = self.registry.broadcast(&frame).await;
                tracing::debug!(
                    file_name,
                    file_size,
                    delivered,
                    "completion event broadcast"
                );
            }
            Err(e) => {
                tracing::error!(file_name, "failed to serialize completion event: {e}");
            }
        }
    }
}
