//! Form session state and the submit cycle.
//!
//! # Architecture
//!
//! ```text
//! submit() ──begin──▶ Arc<Mutex<FormSession>> ◀──reads── frontend
//!    │                        ▲
//!    └──await Generator───────┘ finish_ok / finish_err
//! ```
//!
//! The session is the only mutable state. [`submit`] takes the lock to
//! start and to settle a cycle, and never holds it across the generation
//! call. The `loading` flag is the single-flight guard: while it is set,
//! further submissions are rejected as [`SubmitRejected::Busy`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{error, warn};

use crate::Generator;
use crate::error::{FALLBACK_MESSAGE, GenerateError, SubmitRejected, VALIDATION_NOTICE};
use crate::events::{SessionEvent, SessionObserver};
use crate::logs::LogLine;
use crate::prompt::compose_prompt;
use crate::request::PostRequest;
use crate::segment::{DisplayBlock, segment};

/// Submit button label while idle.
pub const SUBMIT_LABEL_IDLE: &str = "Generate with Gemini";
/// Submit button label while a generation is in flight.
pub const SUBMIT_LABEL_LOADING: &str = "Generating...";

/// State owned by one form session.
#[derive(Debug, Default)]
pub struct FormSession {
    /// The most recently started request.
    pub request: Option<PostRequest>,
    /// Set from submit-start until the cycle settles.
    pub loading: bool,
    /// Generated text, the fallback message, or empty.
    pub result: String,
    /// Whether `result` is the fallback for a failed call.
    pub failed: bool,
    /// Captured log lines, oldest first.
    pub logs: Vec<LogLine>,
}

impl FormSession {
    /// Submit-start transition.
    ///
    /// Rejects when a generation is in flight (checked first, so a disabled
    /// control never produces a notice) or when the request is invalid.
    /// On success the previous result is cleared before any call is made.
    pub fn begin(&mut self, request: PostRequest) -> Result<(), SubmitRejected> {
        if self.loading {
            return Err(SubmitRejected::Busy);
        }
        request.validate()?;
        self.request = Some(request);
        self.result.clear();
        self.failed = false;
        self.loading = true;
        Ok(())
    }

    /// Submit-success transition.
    pub fn finish_ok(&mut self, text: String) {
        self.result = text;
        self.failed = false;
        self.loading = false;
    }

    /// Submit-failure transition. The error itself is not kept.
    pub fn finish_err(&mut self) {
        self.result = FALLBACK_MESSAGE.to_string();
        self.failed = true;
        self.loading = false;
    }

    /// Display blocks for the current result.
    pub fn blocks(&self) -> Vec<DisplayBlock> {
        if self.result.is_empty() {
            return Vec::new();
        }
        segment(&self.result)
    }

    /// Whether the results region is rendered at all.
    pub fn show_results(&self) -> bool {
        !self.result.is_empty()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            SUBMIT_LABEL_LOADING
        } else {
            SUBMIT_LABEL_IDLE
        }
    }

    pub fn submit_enabled(&self) -> bool {
        !self.loading
    }
}

/// Lock the session, recovering the guard if a previous holder panicked.
pub fn lock_session(state: &Arc<Mutex<FormSession>>) -> MutexGuard<'_, FormSession> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A settled submit cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// What the session now displays.
    pub result: String,
    /// The call failed and `result` is the fallback message.
    pub failed: bool,
}

impl SubmitOutcome {
    pub fn blocks(&self) -> Vec<DisplayBlock> {
        segment(&self.result)
    }
}

/// Settles the cycle as failed if it is dropped first (the caller's future
/// was cancelled or the generator panicked), so observers that saw
/// `Started` also see `Finished`.
struct InFlight<'a> {
    state: &'a Arc<Mutex<FormSession>>,
    observer: &'a dyn SessionObserver,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!("Generation abandoned before it settled");
        lock_session(self.state).finish_err();
        self.observer.on_event(&SessionEvent::Finished {
            result: FALLBACK_MESSAGE,
            failed: true,
        });
    }
}

/// Run one generate action against the session.
///
/// 1. Reject if busy (silently) or invalid (one [`SessionEvent::Notice`]).
///    No network call is made and no state changes.
/// 2. Clear the previous result, set `loading`, emit [`SessionEvent::Started`].
/// 3. Await the generator with the session unlocked.
/// 4. Store the text, or log the failure and store [`FALLBACK_MESSAGE`];
///    clear `loading`; emit [`SessionEvent::Finished`].
pub async fn submit<G: Generator + ?Sized>(
    state: &Arc<Mutex<FormSession>>,
    generator: &G,
    observer: &dyn SessionObserver,
    request: PostRequest,
) -> Result<SubmitOutcome, SubmitRejected> {
    let prompt = compose_prompt(&request);

    let begun = lock_session(state).begin(request.clone());
    if let Err(rejected) = begun {
        if rejected.notice().is_some() {
            observer.on_event(&SessionEvent::Notice(VALIDATION_NOTICE));
        }
        return Err(rejected);
    }

    let mut in_flight = InFlight {
        state,
        observer,
        settled: false,
    };
    observer.on_event(&SessionEvent::Started { request: &request });

    let generated: Result<String, GenerateError> = generator.generate(&prompt).await;

    let outcome = {
        let mut s = lock_session(state);
        match generated {
            Ok(text) => s.finish_ok(text),
            Err(err) => {
                error!("Gemini API error: {err}");
                s.finish_err();
            }
        }
        in_flight.settled = true;
        SubmitOutcome {
            result: s.result.clone(),
            failed: s.failed,
        }
    };

    observer.on_event(&SessionEvent::Finished {
        result: &outcome.result,
        failed: outcome.failed,
    });
    Ok(outcome)
}
