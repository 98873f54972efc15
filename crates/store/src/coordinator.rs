use std::sync::Arc;

use tokio::io::AsyncRead;

use crate::storage::Storage;
use crate::writer::BoundedWriter;
use crate::{naming, StoreError, StoredFile, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_UPLOAD_SIZE};

/// Upload policy, fixed at construction.
#[derive(Debug, Clone)]
pub struct UploadLimits {
    /// Hard cap on upload size in bytes.
    pub max_bytes: u64,
    /// Read granularity for streaming writes.
    pub chunk_size: usize,
    /// Prepend a coarse timestamp to generated fallback names.
    pub timestamp_names: bool,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            timestamp_names: false,
        }
    }
}

/// Caller-facing upload failure.
///
/// The coordinator is the only translation point from internal store
/// errors; nothing below it escapes to the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The upload exceeded the configured size cap. A client error.
    #[error("upload exceeds the {limit}-byte limit")]
    PayloadTooLarge { limit: u64 },

    /// Storage could not accept the upload: naming collision, disk
    /// I/O, permissions. A server error; not retried automatically.
    #[error("storage failure: {0}")]
    StorageFailure(String),

    /// The upload stream itself failed while being drained.
    #[error("unexpected upload failure: {0}")]
    Unexpected(String),
}

/// Orchestrates one upload: sanitize the name, stream the bytes through
/// the bounded writer, classify the outcome.
pub struct UploadCoordinator {
    writer: BoundedWriter,
    timestamp_names: bool,
}

impl UploadCoordinator {
    pub fn new(storage: Arc<dyn Storage>, limits: UploadLimits) -> Self {
        Self {
            writer: BoundedWriter::new(storage, limits.max_bytes, limits.chunk_size),
            timestamp_names: limits.timestamp_names,
        }
    }

    /// Handles a single upload request.
    ///
    /// Always returns a definitive outcome; cleanup of partial output
    /// has already happened by the time an error is returned.
    pub async fn handle<R>(
        &self,
        client_name: Option<&str>,
        source: R,
    ) -> Result<StoredFile, UploadError>
    where
        R: AsyncRead + Send + Unpin,
    {
        let name = naming::sanitize_file_name(client_name, self.timestamp_names);

        match self.writer.write(&name, source).await {
            Ok(stored) => {
                tracing::info!(
                    name = %stored.name,
                    size_bytes = stored.size_bytes,
                    "upload stored"
                );
                Ok(stored)
            }
            Err(StoreError::TooLarge { limit }) => {
                tracing::warn!(name = %name, limit, "upload rejected: too large");
                Err(UploadError::PayloadTooLarge { limit })
            }
            Err(StoreError::Stream(e)) => {
                tracing::warn!(name = %name, "upload stream failed: {e}");
                Err(UploadError::Unexpected(e.to_string()))
            }
            Err(e @ (StoreError::Io(_) | StoreError::InvalidName(_))) => {
                tracing::error!(name = %name, "upload storage failure: {e}");
                Err(UploadError::StorageFailure(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;
    use std::io::Cursor;
    use tempfile::tempdir;

    async fn coordinator_in(dir: &std::path::Path, max_bytes: u64) -> UploadCoordinator {
        let storage = Arc::new(LocalStorage::new(dir).await.unwrap());
        UploadCoordinator::new(
            storage,
            UploadLimits {
                max_bytes,
                chunk_size: 32,
                timestamp_names: false,
            },
        )
    }

    #[tokio::test]
    async fn sanitizes_client_name() {
        let dir = tempdir().unwrap();
        let coordinator = coordinator_in(dir.path(), 1024).await;

        let stored = coordinator
            .handle(Some("report final.csv"), Cursor::new(b"0123456789".to_vec()))
            .await
            .unwrap();

        assert_eq!(stored.name, "report_final.csv");
        assert_eq!(stored.size_bytes, 10);
        assert!(dir.path().join("report_final.csv").exists());
    }

    #[tokio::test]
    async fn missing_name_gets_generated_one() {
        let dir = tempdir().unwrap();
        let coordinator = coordinator_in(dir.path(), 1024).await;

        let stored = coordinator
            .handle(None, Cursor::new(b"data".to_vec()))
            .await
            .unwrap();

        let suffix = stored.name.strip_prefix("unnamed_file_").unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn oversize_maps_to_payload_too_large() {
        let dir = tempdir().unwrap();
        let coordinator = coordinator_in(dir.path(), 8).await;

        let result = coordinator
            .handle(Some("big.bin"), Cursor::new(vec![0u8; 9]))
            .await;

        assert!(matches!(
            result,
            Err(UploadError::PayloadTooLarge { limit: 8 })
        ));
        assert!(!dir.path().join("big.bin").exists());
    }

    #[tokio::test]
    async fn broken_stream_maps_to_unexpected() {
        use std::pin::Pin;
        use std::task::{Context, Poll};

        struct BrokenReader;

        impl tokio::io::AsyncRead for BrokenReader {
            fn poll_read(
                self: Pin<&mut Self>,
                _cx: &mut Context<'_>,
                _buf: &mut tokio::io::ReadBuf<'_>,
            ) -> Poll<std::io::Result<()>> {
                Poll::Ready(Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionAborted,
                    "client disconnected",
                )))
            }
        }

        let dir = tempdir().unwrap();
        let coordinator = coordinator_in(dir.path(), 1024).await;

        let result = coordinator.handle(Some("cut.bin"), BrokenReader).await;
        assert!(matches!(result, Err(UploadError::Unexpected(_))));
        assert!(!dir.path().join("cut.bin").exists());
    }

    #[tokio::test]
    async fn collision_maps_to_storage_failure() {
        let dir = tempdir().unwrap();
        let coordinator = coordinator_in(dir.path(), 1024).await;
        std::fs::write(dir.path().join("dup.bin"), b"first").unwrap();

        let result = coordinator
            .handle(Some("dup.bin"), Cursor::new(b"second".to_vec()))
            .await;

        assert!(matches!(result, Err(UploadError::StorageFailure(_))));
        assert_eq!(std::fs::read(dir.path().join("dup.bin")).unwrap(), b"first");
    }
}
