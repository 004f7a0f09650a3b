use apod_core::config::PAGE_MAX_AGE_SECS;
use axum::{
    extract::State,
    http::{header, HeaderName, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::error;

use crate::render::render_page;
use crate::AppState;

fn cache_headers() -> [(HeaderName, String); 1] {
    [(header::CACHE_CONTROL, format!("public, max-age={}", PAGE_MAX_AGE_SECS))]
}

pub async fn on_this_day_page(State(state): State<Arc<AppState>>) -> Response {
    let gallery = state.collector.collect_for(state.today()).await;
    match render_page(&gallery) {
        Ok(html) => (cache_headers(), Html(html)).into_response(),
        Err(e) => {
            error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

pub async fn on_this_day_json(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let gallery = state.collector.collect_for(state.today()).await;
    (cache_headers(), Json(gallery))
}
