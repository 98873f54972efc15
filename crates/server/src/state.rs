use std::sync::Arc;

use filedrop_notify::{NotificationBridge, SubscriberRegistry};
use filedrop_store::{Storage, UploadCoordinator, UploadLimits};

/// Application state shared across handlers.
pub struct AppState {
    pub coordinator: UploadCoordinator,
    pub registry: Arc<SubscriberRegistry>,
    pub bridge: NotificationBridge,
}

impl AppState {
    /// Wires the upload core and the fan-out around the given storage
    /// backend and limits.
    pub fn new(storage: Arc<dyn Storage>, limits: UploadLimits) -> Arc<Self> {
        let registry = Arc::new(SubscriberRegistry::new());
        let bridge = NotificationBridge::new(Arc::clone(&registry));
        Arc::new(Self {
            coordinator: UploadCoordinator::new(storage, limits),
            registry,
            bridge,
        })
    }
}
