//! Reserve-seat input and its validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use ticketd_core::error::AppError;
use ticketd_core::result::AppResult;

/// Request to reserve one seat for one session.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReserveSeatRequest {
    /// Concert the seat belongs to.
    #[validate(custom(function = "validate_uuid"))]
    pub concert_id: String,
    /// Zone the seat belongs to.
    #[validate(custom(function = "validate_uuid"))]
    pub zone_id: String,
    /// Seat to reserve.
    #[validate(custom(function = "validate_uuid"))]
    pub seat_id: String,
    /// Reserving session; also the lock owner token.
    #[validate(length(min = 1, max = 255, message = "session_id is required"))]
    pub session_id: String,
}

/// A validated [`ReserveSeatRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatTarget {
    /// Concert id.
    pub concert_id: Uuid,
    /// Zone id.
    pub zone_id: Uuid,
    /// Seat id.
    pub seat_id: Uuid,
    /// Session id.
    pub session_id: String,
}

impl ReserveSeatRequest {
    /// Build a request from its four fields.
    pub fn new(
        concert_id: impl Into<String>,
        zone_id: impl Into<String>,
        seat_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            concert_id: concert_id.into(),
            zone_id: zone_id.into(),
            seat_id: seat_id.into(),
            session_id: session_id.into(),
        }
    }

    /// Validate and parse into a [`SeatTarget`]. Fails `InvalidArgument`.
    pub fn parse(&self) -> AppResult<SeatTarget> {
        self.validate()
            .map_err(|e| AppError::invalid_argument(format!("the request is invalid: {e}")))?;

        Ok(SeatTarget {
            concert_id: parse_id("concert", &self.concert_id)?,
            zone_id: parse_id("zone", &self.zone_id)?,
            seat_id: parse_id("seat", &self.seat_id)?,
            session_id: self.session_id.clone(),
        })
    }
}

fn parse_id(what: &str, value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|_| AppError::invalid_argument(format!("invalid {what} ID")))
}

fn validate_uuid(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("uuid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketd_core::error::ErrorKind;

    fn valid() -> ReserveSeatRequest {
        ReserveSeatRequest::new(
            Uuid::new_v4().to_string(),
            Uuid::new_v4().to_string(),
            Uuid::new_v4().to_string(),
            "session-a",
        )
    }

    #[test]
    fn test_valid_request_parses() {
        let req = valid();
        let target = req.parse().unwrap();
        assert_eq!(target.seat_id.to_string(), req.seat_id);
        assert_eq!(target.session_id, "session-a");
    }

    #[test]
    fn test_malformed_id_is_invalid_argument() {
        let req = ReserveSeatRequest {
            zone_id: "zone-1".to_string(),
            ..valid()
        };
        let err = req.parse().unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_empty_fields_are_rejected() {
        let no_seat = ReserveSeatRequest {
            seat_id: String::new(),
            ..valid()
        };
        assert_eq!(no_seat.parse().unwrap_err().kind, ErrorKind::InvalidArgument);

        let no_session = ReserveSeatRequest {
            session_id: String::new(),
            ..valid()
        };
        assert_eq!(
            no_session.parse().unwrap_err().kind,
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_overlong_session_is_rejected() {
        let req = ReserveSeatRequest {
            session_id: "x".repeat(256),
            ..valid()
        };
        assert_eq!(req.parse().unwrap_err().kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_request_deserializes_from_json() {
        let json = format!(
            r#"{{"concert_id":"{}","zone_id":"{}","seat_id":"{}","session_id":"s"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let req: ReserveSeatRequest = serde_json::from_str(&json).unwrap();
        assert!(req.parse().is_ok());
    }
}
