use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::StoreError;

/// An open destination for one upload.
///
/// Writing goes through [`AsyncWrite`]; [`finalize`](UploadSink::finalize)
/// flushes and syncs once the stream has ended. A sink that is dropped
/// without being finalized leaves whatever was written, and the caller
/// is responsible for deleting the name afterwards.
#[async_trait]
pub trait UploadSink: AsyncWrite + Send + Unpin {
    /// Flushes buffered data and syncs contents to durable storage.
    async fn finalize(self: Box<Self>) -> io::Result<()>;
}

/// Durable storage the upload core writes into.
///
/// Implementations own path resolution and must refuse names that could
/// escape or alias within the staging area.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Opens `name` for writing. A file already stored under that name
    /// is an error, never an overwrite.
    async fn create_exclusive(&self, name: &str) -> Result<Box<dyn UploadSink>, StoreError>;

    /// Size in bytes of the file stored under `name`.
    async fn size_of(&self, name: &str) -> Result<u64, StoreError>;

    /// Removes the file stored under `name`.
    async fn delete(&self, name: &str) -> Result<(), StoreError>;

    /// The location `name` resolves to.
    fn path_of(&self, name: &str) -> Result<PathBuf, StoreError>;
}

/// Local-filesystem storage rooted at a staging directory.
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Creates the staging directory if needed and returns the backend.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Returns the staging directory.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Rejects names that are empty, path-meaningful, or contain
    /// separators. Sanitized names always pass; this is the backstop
    /// for callers that bypass sanitization.
    fn validate(name: &str) -> Result<(), StoreError> {
        if name.is_empty() {
            return Err(StoreError::InvalidName("empty name".into()));
        }
        if name == "." || name == ".." {
            return Err(StoreError::InvalidName(format!(
                "path-meaningful name not allowed: {name}"
            )));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(StoreError::InvalidName(format!(
                "path separator not allowed: {name}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn create_exclusive(&self, name: &str) -> Result<Box<dyn UploadSink>, StoreError> {
        let path = self.path_of(name)?;
        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        Ok(Box::new(LocalSink { file }))
    }

    async fn size_of(&self, name: &str) -> Result<u64, StoreError> {
        let path = self.path_of(name)?;
        Ok(fs::metadata(&path).await?.len())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.path_of(name)?;
        fs::remove_file(&path).await?;
        Ok(())
    }

    fn path_of(&self, name: &str) -> Result<PathBuf, StoreError> {
        Self::validate(name)?;
        Ok(self.root.join(name))
    }
}

/// File-backed sink for [`LocalStorage`].
struct LocalSink {
    file: fs::File,
}

impl AsyncWrite for LocalSink {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.file).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.file).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.file).poll_shutdown(cx)
    }
}

#[async_trait]
impl UploadSink for LocalSink {
    async fn finalize(mut self: Box<Self>) -> io::Result<()> {
        self.file.flush().await?;
        self.file.sync_all().await
    }
}
