//! Convenience re-exports for common `postcraft` types.
//!
//! ```ignore
//! use postcraft::prelude::*;
//! ```

pub use crate::config::GeminiConfig;
pub use crate::error::{
    FALLBACK_MESSAGE, GenerateError, ParseError, SubmitRejected, VALIDATION_NOTICE,
    ValidationError,
};
pub use crate::events::{
    CompositeObserver, LoggingObserver, NoopObserver, SessionEvent, SessionObserver,
};
pub use crate::logs::{LogBuffer, LogLevel, LogLine, SessionTracingLayer};
pub use crate::platform::{Platform, Tone};
pub use crate::prompt::compose_prompt;
pub use crate::request::PostRequest;
pub use crate::segment::{DisplayBlock, PLATFORM_LABEL, segment};
pub use crate::session::{FormSession, SubmitOutcome, lock_session, submit};
pub use crate::{GeminiClient, GenerateFuture, Generator};
