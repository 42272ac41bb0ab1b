//! Greeting handlers.

use axum::Json;
use axum::extract::Path;

use crate::dto::response::MessageResponse;

/// GET /
pub async fn index() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello World".to_string(),
    })
}

/// GET /hello/{name}
pub async fn hello(Path(name): Path<String>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("Hello {name}"),
    })
}
