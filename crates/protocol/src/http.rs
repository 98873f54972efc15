use serde::{Deserialize, Serialize};

/// Success body returned to the uploader.
///
/// The upload outcome is reported twice by design: once here to the
/// client that performed the POST, and once as an
/// [`UploadCompletedEvent`](crate::UploadCompletedEvent) to every
/// connected subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub file_name: String,
    pub file_size: u64,
}

/// Error body returned for any non-2xx upload outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable kind, e.g. `payload_too_large`.
    pub error: String,
    /// Human-readable detail.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_response_roundtrip() {
        let resp = UploadResponse {
            message: "upload complete".into(),
            file_name: "data.bin".into(),
            file_size: 42,
        };
        let json = serde_json::to_string(&resp).unwrap();
        let parsed: UploadResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, resp);
    }

    #[test]
    fn error_response_fields() {
        let resp = ErrorResponse {
            error: "payload_too_large".into(),
            message: "upload exceeds 100000000 bytes".into(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["error"], "payload_too_large");
        assert!(json["message"].as_str().unwrap().contains("100000000"));
    }
}
