//! Upload ingestion core: name sanitization, bounded streaming writes,
//! and the storage abstraction they run against.
//!
//! The transport layer hands this crate a client-supplied name (possibly
//! absent) and a byte source; it gets back either a [`StoredFile`] or a
//! classified [`UploadError`]. No partial file ever survives a failed
//! upload; cleanup is owned here, not by callers.

mod coordinator;
mod naming;
mod storage;
mod writer;

pub use coordinator::{UploadCoordinator, UploadError, UploadLimits};
pub use naming::sanitize_file_name;
pub use storage::{LocalStorage, Storage, UploadSink};
pub use writer::BoundedWriter;

use std::path::PathBuf;

/// Default read granularity: 8 KiB.
///
/// Small enough to bound peak memory per in-flight upload, large enough
/// to amortize per-read overhead.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Default upload size cap: 100 MB.
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 100_000_000;

/// A fully written upload.
///
/// Only produced once the bytes are durable on disk; `size_bytes` is
/// re-read from storage rather than trusted from the stream counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Sanitized name the file was stored under.
    pub name: String,
    /// Authoritative on-disk size in bytes.
    pub size_bytes: u64,
    /// Resolved location in the staging directory.
    pub path: PathBuf,
}

/// Errors produced by the store crate.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Storage-side failure: collision on create, disk I/O, permissions.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cumulative upload size exceeded the configured cap.
    #[error("upload exceeds {limit} bytes")]
    TooLarge { limit: u64 },

    /// The byte source failed mid-upload (e.g. the client connection
    /// dropped). Distinct from [`StoreError::Io`] so callers can report
    /// it as a client-side rather than server-side failure.
    #[error("upload stream failed: {0}")]
    Stream(std::io::Error),

    /// The name is not usable as a storage key.
    #[error("invalid storage name: {0}")]
    InvalidName(String),
}
