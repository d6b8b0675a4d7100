//! Events emitted during a submit cycle, and observers that react to them.
//!
//! [`submit`](crate::session::submit) reports what it decided through
//! [`SessionEvent`] values. Frontends implement [`SessionObserver`] to
//! show notices, toggle a loading indicator, or push updates to clients.
//!
//! | Observer | Use case |
//! |----------|----------|
//! | [`NoopObserver`] | Tests and fire-and-forget runs |
//! | [`LoggingObserver`] | Structured logging via `tracing` |
//! | [`CompositeObserver`] | Compose multiple observers in order |

use tracing::{error, info};

use crate::request::PostRequest;

/// Events emitted by [`submit`](crate::session::submit).
#[derive(Debug)]
pub enum SessionEvent<'a> {
    /// The submission failed validation. The frontend must show this text
    /// as a blocking notification. Emitted at most once per submission.
    Notice(&'a str),
    /// The previous result was cleared and a generation call is starting.
    Started { request: &'a PostRequest },
    /// The generation settled. `result` is what the session now displays:
    /// the generated text, or the fallback message when `failed` is set.
    Finished { result: &'a str, failed: bool },
}

/// Observer of [`SessionEvent`]s.
pub trait SessionObserver: Send + Sync {
    fn on_event(&self, event: &SessionEvent<'_>);
}

/// Ignores every event.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_event(&self, _event: &SessionEvent<'_>) {}
}

/// Logs every event through `tracing`.
pub struct LoggingObserver;

impl SessionObserver for LoggingObserver {
    fn on_event(&self, event: &SessionEvent<'_>) {
        match event {
            SessionEvent::Notice(text) => info!("Submission rejected: {text}"),
            SessionEvent::Started { request } => info!(
                "Generating posts for {} platform(s), tone={}",
                request.platforms.len(),
                request.tone_name()
            ),
            SessionEvent::Finished { result, failed } => {
                if *failed {
                    error!("Generation failed; showing fallback message");
                } else {
                    info!("Generation finished ({} chars)", result.len());
                }
            }
        }
    }
}

/// Forwards each event to its observers in insertion order.
#[derive(Default)]
pub struct CompositeObserver<'a> {
    observers: Vec<&'a dyn SessionObserver>,
}

impl<'a> CompositeObserver<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: &'a dyn SessionObserver) -> Self {
        self.observers.push(observer);
        self
    }
}

impl SessionObserver for CompositeObserver<'_> {
    fn on_event(&self, event: &SessionEvent<'_>) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}
