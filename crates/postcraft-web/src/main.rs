//! Serve the post generator form in a browser.
//!
//! # Usage
//!
//! ```bash
//! GEMINI_API_KEY=... cargo run -p postcraft-web
//! GEMINI_API_KEY=... cargo run -p postcraft-web -- --port 8080
//! GEMINI_API_KEY=... cargo run -p postcraft-web -- --model gemini-2.5-flash
//! ```
//!
//! Then open the printed URL. The API can also be driven directly:
//!
//! ```json
//! POST /api/generate
//! {"raw_text": "We hit 10k users", "platforms": ["Linkedin"], "tone": "Inspirational"}
//! ```

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use postcraft::prelude::*;
use postcraft_web::{WebConfig, spawn_web};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Browser form for generating social media posts.
#[derive(Parser)]
#[command(about = "Social media post generator with a browser-based form")]
struct Args {
    /// Gemini model to use.
    #[arg(long)]
    model: Option<String>,

    /// Override the API base URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,

    /// Address to bind the web server to.
    #[arg(long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port for the web server.
    #[arg(long, default_value_t = 3001)]
    port: u16,

    /// Directory of extra static assets.
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    // Log to the terminal and capture lines for /api/state.
    let (capture_layer, log_buffer) = SessionTracingLayer::new();
    tracing_subscriber::registry()
        .with(capture_layer)
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = GeminiConfig::from_env().with_timeout(Duration::from_secs(args.timeout_secs));
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    let client = GeminiClient::new(config).map_err(|e| e.to_string())?;

    let session = Arc::new(Mutex::new(FormSession::default()));
    let web_config = WebConfig {
        bind_addr: (args.bind, args.port).into(),
        static_dir: args.static_dir,
        log_buffer: Some(log_buffer),
        ..Default::default()
    };

    let addr = spawn_web(session, Arc::new(client), web_config)
        .await
        .map_err(|e| format!("failed to start web server: {e}"))?;
    println!("Post generator: http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for ctrl-c: {e}"))?;
    Ok(())
}
