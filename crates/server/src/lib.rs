//! HTTP/WebSocket transport for Filedrop.
//!
//! Exposes three routes: `POST /upload` (multipart ingestion),
//! `GET /ws/{client_id}` (subscriber connections), and `GET /` (the
//! upload page). All upload semantics live in `filedrop-store` and all
//! fan-out semantics in `filedrop-notify`; this crate adapts them to
//! axum and manages connection lifecycles.

mod error;
mod handlers;
mod routes;
mod server;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use server::{AppServer, ServerConfig};
pub use state::AppState;

/// Errors produced by the server runner.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
