//! REST API endpoint handlers.

use std::sync::{Arc, Mutex};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use postcraft::Generator;
use postcraft::error::{ParseError, SubmitRejected};
use postcraft::events::{CompositeObserver, LoggingObserver};
use postcraft::logs::LogBuffer;
use postcraft::platform::{Platform, Tone};
use postcraft::request::PostRequest;
use postcraft::session::{FormSession, SubmitOutcome, lock_session, submit};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::broadcast;

use crate::broadcast::{WebBroadcastObserver, WsMessage};
use crate::snapshot::SessionSnapshot;

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<FormSession>>,
    pub generator: Arc<dyn Generator>,
    pub broadcast_tx: broadcast::Sender<WsMessage>,
    pub log_buffer: Option<LogBuffer>,
}

impl AppState {
    /// Snapshot the session, first merging any pending log lines.
    pub fn snapshot(&self) -> SessionSnapshot {
        if let Some(ref buffer) = self.log_buffer {
            buffer.flush_into(&self.session);
        }
        let session = lock_session(&self.session);
        SessionSnapshot::from_session(&session)
    }

    /// Run one submit cycle, reporting to the log and to WebSocket clients.
    pub async fn generate(&self, request: PostRequest) -> Result<SubmitOutcome, SubmitRejected> {
        let broadcaster = WebBroadcastObserver::new(self.broadcast_tx.clone());
        let observer = CompositeObserver::new()
            .with(&LoggingObserver)
            .with(&broadcaster);
        submit(&self.session, self.generator.as_ref(), &observer, request).await
    }
}

/// GET /api/state: Full session snapshot.
pub async fn get_state(State(app): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::to_value(app.snapshot()).unwrap_or_default())
}

/// GET /api/options: Checkbox and selector choices for the form.
pub async fn get_options() -> Json<serde_json::Value> {
    let mut tones = vec![json!({"value": "", "label": Tone::PLACEHOLDER})];
    tones.extend(Tone::ALL.iter().map(|t| {
        json!({
            "value": t.as_str(),
            "label": t.as_str(),
            "badge": t.badge_label(),
            "variant": t.variant(),
        })
    }));
    let platforms: Vec<&str> = Platform::ALL.iter().map(|p| p.as_str()).collect();
    Json(json!({ "platforms": platforms, "tones": tones }))
}

/// Request body for POST /api/generate, as raw form values.
#[derive(Deserialize, Debug)]
pub struct GenerateBody {
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Selector value; `""` means no tone.
    #[serde(default)]
    pub tone: String,
}

impl GenerateBody {
    pub fn into_request(self) -> Result<PostRequest, ParseError> {
        PostRequest::from_form(self.raw_text, &self.platforms, &self.tone)
    }
}

/// POST /api/generate: Run one generation and return its result.
///
/// - 200 `{result, blocks, failed}` once the call settles (failures are
///   reported as the fallback message with `failed: true`).
/// - 422 `{notice}` when text or platforms are missing; nothing is sent upstream.
/// - 409 while another generation is in flight.
/// - 400 for unknown platform or tone values.
pub async fn post_generate(
    State(app): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> (StatusCode, Json<serde_json::Value>) {
    let request = match body.into_request() {
        Ok(r) => r,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            );
        }
    };

    match app.generate(request).await {
        Ok(outcome) => {
            let blocks: Vec<String> = outcome.blocks().iter().map(ToString::to_string).collect();
            (
                StatusCode::OK,
                Json(json!({
                    "result": outcome.result,
                    "blocks": blocks,
                    "failed": outcome.failed,
                })),
            )
        }
        Err(rejected @ SubmitRejected::Invalid(_)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "notice": rejected.notice() })),
        ),
        Err(SubmitRejected::Busy) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": SubmitRejected::Busy.to_string() })),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_body_defaults_missing_fields() {
        let body: GenerateBody = serde_json::from_str(r#"{"raw_text":"hi"}"#).unwrap();
        let request = body.into_request().unwrap();
        assert!(request.platforms.is_empty());
        assert_eq!(request.tone, None);
    }

    #[test]
    fn generate_body_parses_form_values() {
        let body: GenerateBody = serde_json::from_str(
            r#"{"raw_text":"hi","platforms":["Twitter","Linkedin"],"tone":"Inspirational"}"#,
        )
        .unwrap();
        let request = body.into_request().unwrap();
        assert_eq!(request.platforms, vec![Platform::Twitter, Platform::Linkedin]);
        assert_eq!(request.tone, Some(Tone::Inspirational));
    }

    #[test]
    fn generate_body_rejects_unknown_tone() {
        let body: GenerateBody =
            serde_json::from_str(r#"{"raw_text":"hi","platforms":[],"tone":"Angry"}"#).unwrap();
        assert_eq!(
            body.into_request(),
            Err(ParseError::UnknownTone("Angry".into()))
        );
    }

    #[tokio::test]
    async fn options_list_five_tone_choices() {
        let Json(options) = get_options().await;
        assert_eq!(options["platforms"], json!(["Linkedin", "Instagram", "Twitter"]));
        let tones = options["tones"].as_array().unwrap();
        assert_eq!(tones.len(), 5);
        assert_eq!(tones[0]["value"], "");
        assert_eq!(tones[0]["label"], "-- Choose Tone --");
    }
}
