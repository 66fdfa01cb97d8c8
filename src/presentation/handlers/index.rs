use axum::response::{Html, IntoResponse};

/// Landing page with the recorder/upload form, compiled into the binary.
pub async fn index_handler() -> impl IntoResponse {
    Html(include_str!("../../../static/index.html"))
}
