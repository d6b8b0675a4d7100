//! Error types for request validation, form parsing, and generation calls.

use thiserror::Error;

/// Fixed notice shown when a submission fails validation.
pub const VALIDATION_NOTICE: &str = "Please enter text and select at least one platform.";

/// Fixed result text shown in place of any generation failure.
pub const FALLBACK_MESSAGE: &str = "Something went wrong while generating posts.";

/// Why a [`PostRequest`](crate::request::PostRequest) cannot be submitted.
///
/// Both variants render as the same user notice; the variant is kept for
/// logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", VALIDATION_NOTICE)]
    EmptyText,
    #[error("{}", VALIDATION_NOTICE)]
    NoPlatforms,
}

/// A form value that names no known platform or tone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown platform: {0:?}")]
    UnknownPlatform(String),
    #[error("unknown tone: {0:?}")]
    UnknownTone(String),
}

/// Failure of a single call to the generation service.
///
/// None of these reach the render layer: the session logs them and shows
/// [`FALLBACK_MESSAGE`] instead.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Gemini API HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Client(String),
}

/// Why [`submit`](crate::session::submit) did not start a generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// A generation is already in flight.
    #[error("a generation is already in progress")]
    Busy,
}

impl SubmitRejected {
    /// The blocking notice to show the user, if this rejection warrants one.
    ///
    /// A busy rejection is silent: the submit control is disabled anyway.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            SubmitRejected::Invalid(_) => Some(VALIDATION_NOTICE),
            SubmitRejected::Busy => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_render_fixed_notice() {
        assert_eq!(ValidationError::EmptyText.to_string(), VALIDATION_NOTICE);
        assert_eq!(ValidationError::NoPlatforms.to_string(), VALIDATION_NOTICE);
    }

    #[test]
    fn status_error_mentions_http_code() {
        let err = GenerateError::Status {
            status: 403,
            body: "forbidden".into(),
        };
        assert_eq!(err.to_string(), "Gemini API HTTP 403: forbidden");
    }

    #[test]
    fn busy_rejection_has_no_notice() {
        assert_eq!(SubmitRejected::Busy.notice(), None);
        assert_eq!(
            SubmitRejected::from(ValidationError::EmptyText).notice(),
            Some(VALIDATION_NOTICE)
        );
    }
}
