//! Outcome of a request/response exchange.
//!
//! An [`Outcome`] is out-of-band metadata: it is never encoded into the wire
//! payload and never takes part in envelope equality.

use std::fmt;

use chrono::{DateTime, Utc};

/// Closed set of outcome kinds known to the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    /// Wire payload was well-formed and accepted.
    Ok,
    /// Local or processing failure; no wire payload available.
    Server,
    /// No response arrived within the transport deadline.
    Timeout,
    /// A response arrived but did not conform to the message schema.
    FormationViolation,
    /// The peer answered with a CallError.
    Rejected,
}

impl OutcomeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeKind::Ok => "OK",
            OutcomeKind::Server => "Server-error",
            OutcomeKind::Timeout => "Timeout",
            OutcomeKind::FormationViolation => "FormationViolation",
            OutcomeKind::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Outcome {
    fn at_now(kind: OutcomeKind, description: Option<String>) -> Self {
        Self {
            kind,
            description,
            timestamp: Utc::now(),
        }
    }

    pub fn ok() -> Self {
        Self::at_now(OutcomeKind::Ok, None)
    }

    pub fn server() -> Self {
        Self::at_now(OutcomeKind::Server, None)
    }

    pub fn server_with(description: impl Into<String>) -> Self {
        Self::at_now(OutcomeKind::Server, Some(description.into()))
    }

    pub fn timeout() -> Self {
        Self::at_now(OutcomeKind::Timeout, None)
    }

    pub fn formation_violation(description: impl Into<String>) -> Self {
        Self::at_now(OutcomeKind::FormationViolation, Some(description.into()))
    }

    pub fn rejected(description: impl Into<String>) -> Self {
        Self::at_now(OutcomeKind::Rejected, Some(description.into()))
    }

    pub fn is_ok(&self) -> bool {
        self.kind == OutcomeKind::Ok
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(d) => write!(f, "{}: {}", self.kind, d),
            None => write!(f, "{}", self.kind),
        }
    }
}
