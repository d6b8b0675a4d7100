//! Serializable projection of [`FormSession`] for WebSocket and REST transport.
//!
//! Adds the derived view fields a form needs (submit label and enabled
//! state, rendered blocks, tone badge) and caps logs to the most recent
//! entries.

use postcraft::logs::LogLine;
use postcraft::request::PostRequest;
use postcraft::session::FormSession;
use serde::Serialize;

/// Maximum number of log lines included in a snapshot.
const SNAPSHOT_MAX_LOGS: usize = 200;

/// Serializable view of [`FormSession`].
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    // ── Submit control ──
    pub loading: bool,
    pub submit_label: &'static str,
    pub submit_enabled: bool,

    // ── Last request ──
    pub request: Option<PostRequest>,
    pub tone_badge: Option<ToneBadge>,

    // ── Result ──
    pub result: String,
    pub failed: bool,
    /// When `false` the results region is not rendered at all.
    pub show_results: bool,
    /// Each block with its `Platform:` label.
    pub blocks: Vec<String>,

    // ── Logs (capped) ──
    pub logs: Vec<LogLine>,
}

/// The "<Tone> Tone Selected" badge.
#[derive(Debug, Clone, Serialize)]
pub struct ToneBadge {
    pub label: String,
    /// Style variant (e.g., "info", "success").
    pub variant: &'static str,
}

impl SessionSnapshot {
    /// Build a snapshot. Call while holding the session lock.
    pub fn from_session(session: &FormSession) -> Self {
        let tone_badge = session
            .request
            .as_ref()
            .and_then(|r| r.tone)
            .map(|tone| ToneBadge {
                label: tone.badge_label(),
                variant: tone.variant(),
            });

        let log_start = session.logs.len().saturating_sub(SNAPSHOT_MAX_LOGS);

        Self {
            loading: session.loading,
            submit_label: session.submit_label(),
            submit_enabled: session.submit_enabled(),
            request: session.request.clone(),
            tone_badge,
            result: session.result.clone(),
            failed: session.failed,
            show_results: session.show_results(),
            blocks: session.blocks().iter().map(ToString::to_string).collect(),
            logs: session.logs.iter().skip(log_start).cloned().collect(),
        }
    }
}
