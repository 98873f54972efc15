use axum::response::Html;

/// Serves the upload page with its embedded WebSocket client.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
