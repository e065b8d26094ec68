//! Shared error type across ocpp-envelope crates.

use thiserror::Error;

/// OCPP-J CallError codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Payload is syntactically incorrect or not conform the PDU structure.
    FormationViolation,
    /// Payload is syntactically correct but a required field is missing.
    OccurrenceConstraintViolation,
    /// A field holds a value of the wrong data type.
    TypeConstraintViolation,
    /// A field holds a value outside its permitted range or length.
    PropertyConstraintViolation,
    /// Action is recognized but not supported.
    NotImplemented,
    /// Internal error, no further detail.
    InternalError,
    /// Any other error.
    GenericError,
}

impl ErrorCode {
    /// String representation used in CallError frames.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::FormationViolation => "FormationViolation",
            ErrorCode::OccurrenceConstraintViolation => "OccurrenceConstraintViolation",
            ErrorCode::TypeConstraintViolation => "TypeConstraintViolation",
            ErrorCode::PropertyConstraintViolation => "PropertyConstraintViolation",
            ErrorCode::NotImplemented => "NotImplemented",
            ErrorCode::InternalError => "InternalError",
            ErrorCode::GenericError => "GenericError",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, OcppError>;

/// Unified error type used by the core and the inspect tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OcppError {
    /// A response payload was rejected. `message` carries the message-type
    /// context phrase and is meant to be surfaced verbatim.
    #[error("{message}")]
    Decode { code: ErrorCode, message: String },
    /// `Response::parse` was handed a payload `try_parse` rejects.
    #[error("construction failure: {0}")]
    Construction(String),
    #[error("invalid json: {0}")]
    InvalidJson(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl OcppError {
    /// Map to a stable CallError code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            OcppError::Decode { code, .. } => *code,
            OcppError::InvalidJson(_) => ErrorCode::FormationViolation,
            OcppError::UnknownAction(_) => ErrorCode::NotImplemented,
            OcppError::Construction(_)
            | OcppError::BadConfig(_)
            | OcppError::UnsupportedVersion
            | OcppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_displays_message_verbatim() {
        let e = OcppError::Decode {
            code: ErrorCode::OccurrenceConstraintViolation,
            message: "The given JSON representation of a Heartbeat response is invalid: x".into(),
        };
        assert_eq!(
            e.to_string(),
            "The given JSON representation of a Heartbeat response is invalid: x"
        );
        assert_eq!(e.error_code().as_str(), "OccurrenceConstraintViolation");
    }

    #[test]
    fn unknown_action_is_not_implemented() {
        let e = OcppError::UnknownAction("Foo".into());
        assert_eq!(e.error_code(), ErrorCode::NotImplemented);
    }
}
