//! Browser form for the postcraft social media post generator.
//!
//! `postcraft-web` provides an axum server that serves the form page, a REST
//! API to run generations, and a WebSocket endpoint that streams session
//! updates to every open tab.
//!
//! # Quick start
//!
//! ```ignore
//! use postcraft::prelude::*;
//! use postcraft_web::{WebConfig, spawn_web};
//! use std::sync::{Arc, Mutex};
//!
//! let session = Arc::new(Mutex::new(FormSession::default()));
//! let client = Arc::new(GeminiClient::new(GeminiConfig::from_env())?);
//!
//! let addr = spawn_web(session, client, WebConfig::default()).await?;
//! println!("Form: http://{addr}");
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──POST /api/generate──▶ submit() ──▶ Generator (Gemini)
//!    ▲                               │
//!    │                      SessionEvent
//!    │                               ▼
//!    └────────WsMessage────── WebBroadcastObserver
//!
//!           Arc<Mutex<FormSession>> ◀── GET /api/state
//! ```

mod api;
pub mod broadcast;
mod server;
pub mod snapshot;
mod ws;

pub use broadcast::{WebBroadcastObserver, WsMessage};
pub use snapshot::{SessionSnapshot, ToneBadge};

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use postcraft::Generator;
use postcraft::logs::LogBuffer;
use postcraft::session::FormSession;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3001`.
    pub bind_addr: SocketAddr,
    /// Directory of extra static assets, served for any unmatched path.
    pub static_dir: Option<PathBuf>,
    /// WebSocket broadcast channel capacity. Default: 64.
    ///
    /// Clients that fall behind by this many messages receive a fresh
    /// snapshot to resynchronize.
    pub broadcast_capacity: usize,
    /// Captured log lines to merge into snapshots, if a
    /// [`SessionTracingLayer`](postcraft::logs::SessionTracingLayer) is installed.
    pub log_buffer: Option<LogBuffer>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            static_dir: None,
            broadcast_capacity: 64,
            log_buffer: None,
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down.
///
/// # Arguments
///
/// * `session`: State of the single form session served by this process.
/// * `generator`: The generation backend, normally a [`GeminiClient`](postcraft::GeminiClient).
/// * `config`: Server configuration.
pub async fn spawn_web(
    session: Arc<Mutex<FormSession>>,
    generator: Arc<dyn Generator>,
    config: WebConfig,
) -> std::io::Result<SocketAddr> {
    let (broadcast_tx, _) = tokio::sync::broadcast::channel(config.broadcast_capacity.max(1));
    let app_state = api::AppState {
        session,
        generator,
        broadcast_tx,
        log_buffer: config.log_buffer,
    };
    let router = server::build_router(app_state, config.static_dir);
    server::start_server(router, config.bind_addr).await
}
