//! Turn a block of raw text into per-platform social media posts.
//!
//! `postcraft` takes a [`PostRequest`](request::PostRequest) (raw text,
//! target platforms, optional tone), composes an instruction prompt, sends
//! it to the Google Gemini `generateContent` API, and splits the returned
//! text into [`DisplayBlock`](segment::DisplayBlock)s, one per platform.
//!
//! # Getting started
//!
//! ```ignore
//! use postcraft::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), GenerateError> {
//!     let client = GeminiClient::new(GeminiConfig::from_env())?;
//!     let session = Arc::new(Mutex::new(FormSession::default()));
//!
//!     let request = PostRequest::new(
//!         "We just hit 10k users!",
//!         [Platform::Linkedin, Platform::Twitter],
//!         Some(Tone::Inspirational),
//!     );
//!
//!     match submit(&session, &client, &LoggingObserver, request).await {
//!         Ok(outcome) => {
//!             for block in outcome.blocks() {
//!                 println!("{block}\n");
//!             }
//!         }
//!         Err(rejected) => eprintln!("{rejected}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Where to find things
//!
//! - **Validate input:** [`PostRequest::validate`](request::PostRequest::validate).
//! - **Build the prompt:** [`compose_prompt`](prompt::compose_prompt).
//! - **Split the output:** [`segment`](segment::segment).
//! - **Run a whole submit cycle:** [`session::submit`] on an
//!   `Arc<Mutex<FormSession>>`, with any [`Generator`] (the real
//!   [`GeminiClient`] or a test double).
//! - **Observe the cycle:** implement [`SessionObserver`](events::SessionObserver).
//! - **Capture logs for a UI:** [`logs::SessionTracingLayer`].

pub mod config;
pub mod error;
pub mod events;
pub mod logs;
pub mod platform;
pub mod prelude;
pub mod prompt;
pub mod request;
pub mod segment;
pub mod session;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

pub use config::GeminiConfig;
pub use error::GenerateError;

// ── Constants ──────────────────────────────────────────────────────

/// Public Gemini API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model for generation calls.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-goog-api-key";

// ── Request types ──────────────────────────────────────────────────

/// `generateContent` request body.
#[derive(Serialize, Debug)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Part {
    pub text: String,
}

impl GenerateContentRequest {
    /// A single-turn request with one text part.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

// ── Response types ─────────────────────────────────────────────────

/// Raw API response. Every level is optional so a missing path decodes
/// instead of failing.
#[derive(Deserialize, Debug)]
struct RawGenerateResponse {
    #[serde(default)]
    candidates: Option<Vec<RawCandidate>>,
}

#[derive(Deserialize, Debug)]
struct RawCandidate {
    #[serde(default)]
    content: Option<RawContent>,
}

#[derive(Deserialize, Debug)]
struct RawContent {
    #[serde(default)]
    parts: Option<Vec<RawPart>>,
}

#[derive(Deserialize, Debug)]
struct RawPart {
    #[serde(default)]
    text: Option<String>,
}

impl RawGenerateResponse {
    /// `candidates[0].content.parts[0].text`, or `""` when any step is absent.
    fn into_text(self) -> String {
        self.candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|p| p.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default()
    }
}

/// Extract the generated text from a success-status response body.
///
/// Fails only when the body is not JSON of the expected overall shape; a
/// well-formed body without text yields `""`.
pub fn parse_generated_text(body: &str) -> Result<String, GenerateError> {
    let parsed: RawGenerateResponse = serde_json::from_str(body)?;
    Ok(parsed.into_text())
}

// ── Generator seam ─────────────────────────────────────────────────

/// Boxed future returned by [`Generator::generate`].
pub type GenerateFuture<'a> = BoxFuture<'a, Result<String, GenerateError>>;

/// Anything that can turn a prompt into generated text.
///
/// [`GeminiClient`] is the production implementation; tests substitute
/// doubles that count calls or fail on demand.
pub trait Generator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a>;
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("postcraft/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerateError::Client(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Send one prompt and return the first candidate's text.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GenerateError> {
        let body = GenerateContentRequest::from_prompt(prompt);
        debug!(
            "Gemini request: model={}, prompt={} chars",
            self.config.model,
            prompt.len()
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(&body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let resp = self
            .client
            .post(self.config.endpoint())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        debug!(
            "Gemini response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            return Err(GenerateError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let generated = parse_generated_text(&text)?;
        if generated.is_empty() {
            debug!("Gemini output: empty (no candidate text)");
        } else {
            debug!("Gemini output: {} chars text", generated.len());
        }
        Ok(generated)
    }
}

impl Generator for GeminiClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        self.generate_content(prompt).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    #[test]
    fn request_body_shape() {
        let body = GenerateContentRequest::from_prompt("hello");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"contents": [{"parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn parses_first_candidate_text() {
        let body = r#"{"candidates":[
            {"content":{"parts":[{"text":"Platform: Twitter\nPost: hi"},{"text":"ignored"}]}},
            {"content":{"parts":[{"text":"second"}]}}
        ]}"#;
        assert_eq!(
            parse_generated_text(body).unwrap(),
            "Platform: Twitter\nPost: hi"
        );
    }

    #[test]
    fn missing_path_is_empty_text() {
        for body in [
            "{}",
            r#"{"candidates":[]}"#,
            r#"{"candidates":null}"#,
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{}}]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{}]}}]}"#,
        ] {
            assert_eq!(parse_generated_text(body).unwrap(), "", "body: {body}");
        }
    }

    #[test]
    fn non_json_body_is_decode_error() {
        let err = parse_generated_text("<html>oops</html>").unwrap_err();
        assert!(matches!(err, GenerateError::Decode(_)));
    }

    /// Fake Gemini endpoint that records the key header and prompt, then
    /// replies with a fixed status and body.
    async fn spawn_fake_gemini(
        status: StatusCode,
        reply: serde_json::Value,
    ) -> (SocketAddr, Arc<Mutex<Vec<(String, serde_json::Value)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_handler = seen.clone();
        let app = Router::new().route(
            "/v1beta/models/{model}",
            post(move |headers: HeaderMap, Json(body): Json<serde_json::Value>| {
                let seen = seen_in_handler.clone();
                let reply = reply.clone();
                async move {
                    let key = headers
                        .get(API_KEY_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    seen.lock().unwrap().push((key, body));
                    (status, Json(reply))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (addr, seen)
    }

    fn client_for(addr: SocketAddr) -> GeminiClient {
        let config = GeminiConfig::default()
            .with_base_url(format!("http://{addr}"))
            .with_api_key("test-key");
        GeminiClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn client_posts_prompt_with_key_header() {
        let (addr, seen) = spawn_fake_gemini(
            StatusCode::OK,
            serde_json::json!({"candidates":[{"content":{"parts":[{"text":"Platform: Linkedin\nPost: ok"}]}}]}),
        )
        .await;

        let text = client_for(addr).generate_content("make posts").await.unwrap();
        assert_eq!(text, "Platform: Linkedin\nPost: ok");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "test-key");
        assert_eq!(seen[0].1["contents"][0]["parts"][0]["text"], "make posts");
    }

    #[tokio::test]
    async fn client_reports_http_status() {
        let (addr, _seen) = spawn_fake_gemini(
            StatusCode::UNAUTHORIZED,
            serde_json::json!({"error": {"message": "API key not valid"}}),
        )
        .await;

        let err = client_for(addr).generate_content("x").await.unwrap_err();
        match err {
            GenerateError::Status { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("API key not valid"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn client_reports_connection_failure() {
        // Bind then drop a listener so the port is closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(addr).generate_content("x").await.unwrap_err();
        assert!(matches!(err, GenerateError::Request(_)));
    }
}
