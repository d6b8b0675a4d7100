//! Axum server setup and router construction.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::response::Html;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::error;

use crate::api::{self, AppState};
use crate::ws;

/// The form page.
const INDEX_HTML: &str = include_str!("../static/index.html");

/// GET /: The form page.
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Build the full axum router.
///
/// The router serves:
/// - the form page at `/`
/// - WebSocket at `/ws`
/// - REST API at `/api/*`
/// - optional static assets from `static_dir`
pub fn build_router(app_state: AppState, static_dir: Option<PathBuf>) -> Router {
    // CORS layer for frontends served from another origin during development.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(index))
        .route("/ws", get(ws::ws_upgrade))
        .route("/api/state", get(api::get_state))
        .route("/api/options", get(api::get_options))
        .route("/api/generate", post(api::post_generate))
        .with_state(app_state)
        .layer(cors);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
}

/// Bind the listener, spawn the server, and return the bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("Web server stopped: {e}");
        }
    });

    Ok(addr)
}
