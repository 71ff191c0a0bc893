//! Engine boundary error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong at the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EngineErrorKind {
    /// The engine could not be loaded or is gone.
    #[display("Engine unavailable: {}", _0)]
    Unavailable(String),

    /// The engine refused the call.
    #[display("Engine rejected the call: {}", _0)]
    Rejected(String),

    /// The engine answered with something the client cannot accept.
    #[display("Malformed engine response: {}", _0)]
    Protocol(String),
}

/// Engine boundary error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct EngineError {
    /// Error category and detail.
    pub kind: EngineErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EngineError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    #[instrument(skip(kind))]
    pub fn new(kind: EngineErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for [`EngineErrorKind::Protocol`].
    #[track_caller]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::Protocol(message.into()))
    }

    /// Shorthand for [`EngineErrorKind::Rejected`].
    #[track_caller]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::Rejected(message.into()))
    }

    /// Shorthand for [`EngineErrorKind::Unavailable`].
    #[track_caller]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::Unavailable(message.into()))
    }
}

impl From<serde_json::Error> for EngineError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::protocol(format!("JSON decode failed: {}", err))
    }
}

impl From<strictly_quarto::RuleError> for EngineError {
    #[track_caller]
    fn from(err: strictly_quarto::RuleError) -> Self {
        Self::rejected(err.to_string())
    }
}
