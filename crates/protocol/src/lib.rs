//! Wire types for Filedrop client-server communication.
//!
//! Two surfaces share these types: the HTTP upload endpoint (request
//! outcome bodies) and the WebSocket event stream (push notifications).
//! The browser client parses these structures directly, so field names
//! here are a compatibility contract (pinned in `tests/wire_compat`).

mod events;
mod http;

pub use events::UploadCompletedEvent;
pub use http::{ErrorResponse, UploadResponse};
