use serde::{Deserialize, Serialize};

/// Pushed to every connected subscriber when an upload has been
/// durably written.
///
/// Serialized flat (no envelope): subscribers are receive-only, so
/// there is no request id to correlate. The browser client reads
/// exactly `file_name` and `file_size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCompletedEvent {
    /// Sanitized name the file was stored under.
    pub file_name: String,
    /// Final on-disk size in bytes.
    pub file_size: u64,
}

impl UploadCompletedEvent {
    pub fn new(file_name: impl Into<String>, file_size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            file_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_json_field_names() {
        let event = UploadCompletedEvent::new("report.csv", 1024);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["file_name"], "report.csv");
        assert_eq!(json["file_size"], 1024);
    }

    #[test]
    fn event_json_roundtrip() {
        let event = UploadCompletedEvent::new("a_b.bin", 0);
        let json = serde_json::to_string(&event).unwrap();
        let parsed: UploadCompletedEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn event_has_no_extra_keys() {
        let event = UploadCompletedEvent::new("x", 1);
        let json = serde_json::to_value(&event).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
    }
}
