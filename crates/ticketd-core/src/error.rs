//! Unified application error types for ticketd.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Callers branch on [`ErrorKind`] and
//! read [`AppError::code`] for a stable machine-readable code.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Malformed identifiers, empty updates, or mismatched ownership
    /// between concert, zone and seat.
    InvalidArgument,
    /// The requested concert, zone, seat or reservation was not found.
    NotFound,
    /// The request conflicts with current state (seat held or booked,
    /// concert already passed).
    Conflict,
    /// Lock backend or database failure not otherwise classified.
    Internal,
    /// Configuration could not be loaded or is invalid.
    Configuration,
}

impl ErrorKind {
    /// Return the stable upper-snake code for this kind.
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Internal => "INTERNAL",
            Self::Configuration => "CONFIGURATION",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Domain-specific error codes refining an [`ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorCode {
    /// The seat is currently held by another session.
    SeatLocked,
    /// The seat has already been booked.
    SeatAlreadyBooked,
    /// The concert date is in the past.
    ConcertAlreadyPassed,
}

impl ErrorCode {
    /// Return the stable upper-snake code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SeatLocked => "SEAT_LOCKED",
            Self::SeatAlreadyBooked => "SEAT_ALREADY_BOOKED",
            Self::ConcertAlreadyPassed => "CONCERT_ALREADY_PASSED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unified application error used throughout ticketd.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// Optional domain-specific code.
    pub code: Option<ErrorCode>,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Attach a domain-specific code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// The seat is held by a different session.
    pub fn seat_locked() -> Self {
        Self::conflict("the seat is being reserved by another session")
            .with_code(ErrorCode::SeatLocked)
    }

    /// The seat has already been booked.
    pub fn seat_already_booked() -> Self {
        Self::conflict("the seat is already booked").with_code(ErrorCode::SeatAlreadyBooked)
    }

    /// The concert date has passed.
    pub fn concert_already_passed() -> Self {
        Self::conflict("the concert has already passed")
            .with_code(ErrorCode::ConcertAlreadyPassed)
    }

    /// Stable machine-readable code: the domain code when present,
    /// otherwise the kind code.
    pub fn code(&self) -> &'static str {
        match self.code {
            Some(code) => code.as_str(),
            None => self.kind.as_code(),
        }
    }

    /// Whether the caller may sensibly retry the same request later.
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            ErrorKind::Internal => true,
            ErrorKind::Conflict => self.code == Some(ErrorCode::SeatLocked),
            _ => false,
        }
    }

    /// Whether this error carries the given domain code.
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == Some(code)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            code: self.code,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_prefers_domain_code() {
        assert_eq!(AppError::seat_locked().code(), "SEAT_LOCKED");
        assert_eq!(AppError::seat_already_booked().code(), "SEAT_ALREADY_BOOKED");
        assert_eq!(AppError::not_found("seat not found").code(), "NOT_FOUND");
    }

    #[test]
    fn test_conflicts_are_distinguishable_from_internal() {
        let locked = AppError::seat_locked();
        assert_eq!(locked.kind, ErrorKind::Conflict);
        assert!(locked.is_retryable());

        let booked = AppError::seat_already_booked();
        assert_eq!(booked.kind, ErrorKind::Conflict);
        assert!(!booked.is_retryable());

        assert!(AppError::internal("redis down").is_retryable());
        assert!(!AppError::invalid_argument("bad id").is_retryable());
    }

    #[test]
    fn test_display_includes_kind() {
        let err = AppError::not_found("zone not found");
        assert_eq!(err.to_string(), "NOT_FOUND: zone not found");
    }

    #[test]
    fn test_clone_drops_source_keeps_code() {
        let err = AppError::with_source(
            ErrorKind::Internal,
            "wrapped",
            std::io::Error::other("boom"),
        )
        .with_code(ErrorCode::SeatLocked);
        let cloned = err.clone();
        assert!(cloned.source.is_none());
        assert_eq!(cloned.code, Some(ErrorCode::SeatLocked));
    }
}
