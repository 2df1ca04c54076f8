//! Web server for result viewing
//!
//! Provides an HTTP server using Axum to serve the result page and JSON API
//! endpoints. The current result can be replaced at runtime with a POST.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

use crate::config::CompiledConfig;
use crate::model::AnalysisResult;
use crate::view::{ResultView, ViewOptions};

use super::routes;

/// Shared application state
pub struct AppState {
    /// Current result; swapped as a whole, never mutated in place
    current: RwLock<Option<Arc<AnalysisResult>>>,
    pub view_options: ViewOptions,
}

impl AppState {
    pub fn new(initial: Option<AnalysisResult>, view_options: ViewOptions) -> Self {
        Self {
            current: RwLock::new(initial.map(Arc::new)),
            view_options,
        }
    }

    /// Snapshot of the current result
    pub async fn current(&self) -> Option<Arc<AnalysisResult>> {
        self.current.read().await.clone()
    }

    /// Replace the current result, returning the previous one
    pub async fn replace(&self, result: Arc<AnalysisResult>) -> Option<Arc<AnalysisResult>> {
        let mut guard = self.current.write().await;
        guard.replace(result)
    }

    /// Render the view of the current result
    pub async fn view(&self) -> Option<ResultView> {
        let result = self.current().await?;
        Some(ResultView::render_with_options(&result, &self.view_options))
    }
}

/// Configuration for the web server
pub struct ServerConfig {
    pub port: u16,
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            open_browser: true,
        }
    }
}

impl From<&CompiledConfig> for ServerConfig {
    fn from(config: &CompiledConfig) -> Self {
        Self {
            port: config.port,
            open_browser: config.open_browser,
        }
    }
}

/// Build the application router
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::api_routes())
        .merge(routes::static_routes())
        .layer(cors)
        .with_state(state)
}

/// Start the web server and serve the result page
pub async fn start_server(
    initial: Option<AnalysisResult>,
    view_options: ViewOptions,
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = Arc::new(AppState::new(initial, view_options));
    let app = build_app(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr).await?;

    let url = format!("http://localhost:{}", config.port);
    tracing::info!("Starting web server at {}", url);

    if config.open_browser {
        tracing::info!("Opening browser...");
        if let Err(e) = open::that(&url) {
            tracing::warn!("Could not open browser: {}", e);
            tracing::warn!("Please open {} manually", url);
        }
    }

    eprintln!("Press Ctrl+C to stop the server");

    axum::serve(listener, app).await?;

    Ok(())
}
