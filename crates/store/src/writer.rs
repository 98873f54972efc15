use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

use crate::storage::{Storage, UploadSink};
use crate::{StoreError, StoredFile};

/// Streams an upload into storage while enforcing a hard size cap.
///
/// Every failure path deletes whatever was written before returning,
/// so no partial file ever outlives a failed call. The one exception
/// is a `create_exclusive` collision: the pre-existing file belongs to
/// someone else and is left alone.
pub struct BoundedWriter {
    storage: Arc<dyn Storage>,
    max_bytes: u64,
    chunk_size: usize,
}

impl BoundedWriter {
    pub fn new(storage: Arc<dyn Storage>, max_bytes: u64, chunk_size: usize) -> Self {
        Self {
            storage,
            max_bytes,
            chunk_size,
        }
    }

    /// Consumes `source` to EOF and stores it under `name`.
    ///
    /// The reported size is re-read from storage after the sink is
    /// finalized, not taken from the streamed byte count.
    pub async fn write<R>(&self, name: &str, mut source: R) -> Result<StoredFile, StoreError>
    where
        R: AsyncRead + Send + Unpin,
    {
        let mut sink = self.storage.create_exclusive(name).await?;
        let mut buf = vec![0u8; self.chunk_size];
        let mut received: u64 = 0;

        loop {
            let n = match source.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    self.discard(name, sink).await;
                    return Err(StoreError::Stream(e));
                }
            };

            received += n as u64;
            if received > self.max_bytes {
                self.discard(name, sink).await;
                return Err(StoreError::TooLarge {
                    limit: self.max_bytes,
                });
            }

            if let Err(e) = sink.write_all(&buf[..n]).await {
                self.discard(name, sink).await;
                return Err(e.into());
            }
        }

        if let Err(e) = sink.finalize().await {
            self.delete_partial(name).await;
            return Err(e.into());
        }

        let size_bytes = match self.storage.size_of(name).await {
            Ok(size) => size,
            Err(e) => {
                self.delete_partial(name).await;
                return Err(e);
            }
        };

        Ok(StoredFile {
            name: name.to_owned(),
            size_bytes,
            path: self.storage.path_of(name)?,
        })
    }

    /// Drops the open sink, then removes the partial file.
    async fn discard(&self, name: &str, sink: Box<dyn UploadSink>) {
        drop(sink);
        self.delete_partial(name).await;
    }

    async fn delete_partial(&self, name: &str) {
        if let Err(e) = self.storage.delete(name).await {
            tracing::warn!(name, "failed to clean up partial upload: {e}");
        }
    }
}
