use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::Response;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use filedrop_notify::subscriber_channel;

use crate::state::AppState;

/// Handles `GET /ws/{client_id}`.
///
/// The client id is caller-supplied (the browser generates a random
/// one); connecting again with the same id supersedes the previous
/// connection.
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| subscriber_session(state, client_id, socket))
}

/// Runs one subscriber connection until it closes.
async fn subscriber_session(state: Arc<AppState>, client_id: String, socket: WebSocket) {
    let (sender, rx) = subscriber_channel();
    // Weak handle only: the registry must stay the sole owner of the
    // channel so that dropping its entry (unregister or reconnect)
    // closes it and ends the write pump.
    let channel = sender.downgrade();
    state.registry.register(client_id.clone(), sender).await;
    tracing::info!(client_id = %client_id, "subscriber connected");

    let (ws_sink, ws_stream) = socket.split();
    let mut write = tokio::spawn(write_pump(ws_sink, rx));
    let mut read = tokio::spawn(read_pump(ws_stream));

    // The write pump ends when the registry drops this session's
    // channel (unregister or reconnect) or when a send fails; the read
    // pump ends when the client goes away. Either way the session is
    // over.
    tokio::select! {
        _ = &mut write => read.abort(),
        _ = &mut read => {}
    }

    // Identity-checked removal: if a reconnect already replaced this
    // channel (upgrade fails once the registry dropped it), the
    // replacement stays.
    if let Some(channel) = channel.upgrade() {
        state
            .registry
            .unregister_channel(&client_id, &channel)
            .await;
    }
    tracing::info!(client_id = %client_id, "subscriber disconnected");
}

/// Drains the subscriber channel into the socket.
async fn write_pump(mut sink: SplitSink<WebSocket, Message>, mut rx: mpsc::Receiver<String>) {
    while let Some(frame) = rx.recv().await {
        if let Err(e) = sink.send(Message::Text(frame.into())).await {
            tracing::debug!("subscriber write failed: {e}");
            break;
        }
    }
    // Best-effort close frame.
    let _ = sink.close().await;
}

/// Drains inbound frames until the client closes or errors.
///
/// Subscribers are receive-only; anything they send is discarded.
/// Polling here also keeps automatic ping/pong handling alive.
async fn read_pump(mut stream: SplitStream<WebSocket>) {
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => {}
        }
    }
}
