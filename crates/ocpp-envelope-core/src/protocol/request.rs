//! Request handles.
//!
//! Responses hold the request that produced them behind an `Arc`, purely for
//! correlation. Request payloads live outside this crate; anything that can
//! name its call id and action can be a request here.

use std::fmt;

use chrono::{DateTime, Utc};

/// OCPP-J unique message id of a Call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

pub trait Request: fmt::Debug + Send + Sync {
    fn request_id(&self) -> &RequestId;
    /// OCPP action name, e.g. `"Heartbeat"`.
    fn action(&self) -> &str;
}

/// Minimal in-flight call handle, as kept by a transport's pending-call table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCall {
    pub id: RequestId,
    pub action: String,
    pub sent_at: DateTime<Utc>,
}

impl PendingCall {
    pub fn new(id: impl Into<RequestId>, action: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            action: action.into(),
            sent_at: Utc::now(),
        }
    }
}

impl Request for PendingCall {
    fn request_id(&self) -> &RequestId {
        &self.id
    }

    fn action(&self) -> &str {
        &self.action
    }
}
