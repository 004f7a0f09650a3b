use apod_core::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod handlers;
pub mod render;
pub mod state;

pub use render::render_page;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::on_this_day_page))
        .route("/on-this-day", get(handlers::on_this_day_page))
        .route("/api/on-this-day", get(handlers::on_this_day_json))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌌 Serving on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apod_core::{ApodConfig, ApodError, ApodResponse, Fetcher, Gallery};
    use apod_fetch::GalleryCollector;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use chrono::NaiveDate;
    use std::time::Duration;
    use tower::ServiceExt;

    /// Every odd year has a picture; even years fail.
    struct OddYears;

    #[async_trait]
    impl Fetcher for OddYears {
        fn source(&self) -> &str {
            "odd-years"
        }

        async fn fetch(&self, date: &str) -> ApodResponse {
            let year: i32 = date[..4].parse().unwrap_or(0);
            if year % 2 == 0 {
                return ApodError::new(500, "even year").into();
            }
            serde_json::from_value(serde_json::json!({
                "date": date,
                "explanation": "An odd year.",
                "media_type": "image",
                "service_version": "v1",
                "title": format!("Odd {}", year),
                "url": "https://apod.nasa.gov/apod/odd.jpg"
            }))
            .unwrap()
        }
    }

    fn app() -> Router {
        let config = ApodConfig::default().with_throttle(Duration::ZERO);
        let collector = GalleryCollector::new(Arc::new(OddYears), &config);
        let day = NaiveDate::from_ymd_opt(2000, 10, 17).unwrap();
        create_app(AppState::new(collector).with_fixed_day(day))
    }

    async fn request(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let cache = response
            .headers()
            .get(header::CACHE_CONTROL)
            .map(|v| v.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, cache, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_page_served_with_cache_hint() {
        let (status, cache, body) = request(app(), "/on-this-day").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("public, max-age=3600"));
        assert!(body.contains("October 17th"));
        assert!(body.contains("2 of 5 APOD entries could not be retrieved."));
        assert!(body.find("Odd 1999").unwrap() < body.find("Odd 1997").unwrap());
    }

    #[tokio::test]
    async fn test_root_serves_page() {
        let (status, _, body) = request(app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("On This Day in History"));
    }

    #[tokio::test]
    async fn test_json_view() {
        let (status, cache, body) = request(app(), "/api/on-this-day").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("public, max-age=3600"));

        let gallery: Gallery = serde_json::from_str(&body).unwrap();
        assert_eq!(gallery.attempted_count(), 5);
        assert_eq!(gallery.failed, 2);
        let dates: Vec<&str> = gallery.entries.iter().map(|a| a.date.as_str()).collect();
        assert_eq!(dates, vec!["1999-10-17", "1997-10-17", "1995-10-17"]);
    }
}
