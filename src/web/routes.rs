//! HTTP routes for the result viewer
//!
//! Provides API endpoints for the current result and its views, the HTML
//! page, and static file serving.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use rust_embed::RustEmbed;
use serde_json::json;

use super::page::{PageOptions, render_html_page};
use super::server::AppState;
use crate::model::AnalysisResult;
use crate::view::ResultView;

/// Embedded static assets
#[derive(RustEmbed)]
#[folder = "web-assets/"]
struct Assets;

/// Create API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/view", get(get_view))
        .route("/api/result", get(get_result).post(post_result))
        .route("/api/health", get(health_check))
}

/// Create page and static file routes
pub fn static_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index_html))
        .route("/assets/{*path}", get(static_handler))
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({"error": message.into()}))).into_response()
}

/// GET /api/view - Returns every derived view of the current result
async fn get_view(State(state): State<Arc<AppState>>) -> Response {
    match state.view().await {
        Some(view) => Json(view).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "No analysis result loaded"),
    }
}

/// GET /api/result - Returns the current raw result
async fn get_result(State(state): State<Arc<AppState>>) -> Response {
    match state.current().await {
        Some(result) => Json(result.as_ref().clone()).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "No analysis result loaded"),
    }
}

/// POST /api/result - Replaces the current result and returns its view
async fn post_result(State(state): State<Arc<AppState>>, body: String) -> Response {
    let result = match AnalysisResult::from_json_str(&body) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("Rejected analysis payload: {}", e);
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    tracing::info!("Replacing analysis result (score {})", result.score);
    let result = Arc::new(result);
    state.replace(result.clone()).await;

    // Render the posted snapshot, not whatever is current by now
    Json(ResultView::render_with_options(&result, &state.view_options)).into_response()
}

/// GET /api/health - Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// GET / - Serve the result page
async fn index_html(State(state): State<Arc<AppState>>) -> Html<String> {
    let view = state.view().await;
    Html(render_html_page(view.as_ref(), PageOptions { live: true }))
}

/// Static file handler for embedded assets
async fn static_handler(Path(path): Path<String>) -> Response {
    let path = path.trim_start_matches('/');

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, format!("File not found: {}", path)).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewOptions;

    fn state(initial: Option<&str>) -> Arc<AppState> {
        let result = initial.map(|json| AnalysisResult::from_json_str(json).unwrap());
        Arc::new(AppState::new(result, ViewOptions::default()))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_view_without_result_is_not_found() {
        let response = get_view(State(state(None))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("No analysis"));
    }

    #[tokio::test]
    async fn test_view_with_result() {
        let response = get_view(State(state(Some(r#"{"score": 82}"#)))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["gauge"]["color_tier"], "high");
    }

    #[tokio::test]
    async fn test_get_result_round_trips_meta_order() {
        let app_state = state(Some(r#"{"score": 70, "meta": {"z": "1", "a": "2"}}"#));
        let response = get_result(State(app_state)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let text = body_text(response).await;
        assert!(text.find("\"z\"").unwrap() < text.find("\"a\"").unwrap());
    }

    #[tokio::test]
    async fn test_post_result_replaces_current() {
        let app_state = state(Some(r#"{"score": 10}"#));

        let response = post_result(
            State(app_state.clone()),
            r#"{"score": 65, "meta": {"title": "New"}}"#.to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["gauge"]["display_label"], "65");
        assert_eq!(json["key_tags"][0]["value"], "New");

        assert_eq!(app_state.current().await.unwrap().score, 65.0);
    }

    #[tokio::test]
    async fn test_post_returns_view_of_its_own_payload() {
        let app_state = state(None);

        let response = post_result(
            State(app_state.clone()),
            r#"{"score": 55, "meta": {"title": "First"}}"#.to_string(),
        )
        .await;

        // Another result lands before the first response is read
        let second = AnalysisResult::from_json_str(r#"{"score": 99, "meta": {"title": "Second"}}"#)
            .unwrap();
        app_state.replace(Arc::new(second)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["gauge"]["display_label"], "55");
        assert_eq!(json["key_tags"][0]["value"], "First");
        assert_eq!(app_state.current().await.unwrap().score, 99.0);
    }

    #[tokio::test]
    async fn test_post_invalid_payload_keeps_current() {
        let app_state = state(Some(r#"{"score": 10}"#));

        let response = post_result(State(app_state.clone()), "[1, 2, 3]".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("JSON object"));

        let response = post_result(State(app_state.clone()), "{not json".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert_eq!(app_state.current().await.unwrap().score, 10.0);
    }

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(health_check().await, "ok");
    }

    #[tokio::test]
    async fn test_index_page() {
        let Html(html) = index_html(State(state(None))).await;
        assert!(html.contains("No analysis loaded"));

        let Html(html) = index_html(State(state(Some(r#"{"score": 77}"#)))).await;
        assert!(html.contains(r#"class="gauge-number">77</text>"#));
        assert!(html.contains("/assets/live.js"));
    }

    #[tokio::test]
    async fn test_static_assets() {
        let response = static_handler(Path("live.js".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.contains("javascript"));

        let response = static_handler(Path("missing.css".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
