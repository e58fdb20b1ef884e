use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use super::PreviewContent;
use crate::snapshot::MapSnapshot;

pub fn create_router(content: Arc<PreviewContent>) -> Router {
    Router::new()
        .route("/map.json", get(serve_snapshot))
        .route("/markers.geojson", get(serve_markers))
        .route("/health", get(health))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(content)
}

async fn serve_snapshot(State(content): State<Arc<PreviewContent>>) -> Json<MapSnapshot> {
    Json(content.snapshot.clone())
}

async fn serve_markers(State(content): State<Arc<PreviewContent>>) -> Response {
    match &content.markers {
        Some(markers) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/geo+json")],
            markers.to_json(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn health() -> &'static str {
    "OK"
}
