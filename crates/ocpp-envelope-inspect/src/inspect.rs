//! Inspect operations over the known response messages.
//!
//! Each operation resolves an action name to its message type, runs the core
//! codec, and reports what a transport would see: the outcome, the signature
//! count, and the canonical re-encoding.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use ocpp_envelope_core::error::{OcppError, Result};
use ocpp_envelope_core::messages::{
    BootNotificationResponse, DataTransferResponse, HeartbeatResponse, StatusNotificationResponse,
};
use ocpp_envelope_core::protocol::schema::{self, Drift};
use ocpp_envelope_core::protocol::{
    CodecOptions, JsonObject, Outcome, PendingCall, Response, ResponseBody,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    BootNotification,
    DataTransfer,
    Heartbeat,
    StatusNotification,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::BootNotification,
        Action::DataTransfer,
        Action::Heartbeat,
        Action::StatusNotification,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::BootNotification => BootNotificationResponse::ACTION,
            Action::DataTransfer => DataTransferResponse::ACTION,
            Action::Heartbeat => HeartbeatResponse::ACTION,
            Action::StatusNotification => StatusNotificationResponse::ACTION,
        }
    }

    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == name)
            .ok_or_else(|| OcppError::UnknownAction(name.to_owned()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the codec made of one payload.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub action: Action,
    pub outcome: Outcome,
    pub signatures: usize,
    pub encoded: JsonObject,
}

fn inspect<M: ResponseBody>(action: Action, r: &Response<PendingCall, M>) -> Inspection {
    Inspection {
        action,
        outcome: r.outcome().clone(),
        signatures: r.signatures().len(),
        encoded: r.to_json(),
    }
}

fn decode_as<M: ResponseBody>(
    action: Action,
    request: Arc<PendingCall>,
    payload: &Value,
    options: &CodecOptions,
) -> Result<Inspection> {
    let r = Response::<PendingCall, M>::try_parse_with(request, payload, None, options)?;
    Ok(inspect(action, &r))
}

fn failed_as<M: ResponseBody>(action: Action, request: Arc<PendingCall>) -> Inspection {
    inspect(action, &Response::<PendingCall, M>::failed(request))
}

/// Decode `payload` as the `action` response to call `request_id`.
pub fn decode(
    action: Action,
    request_id: &str,
    payload: &Value,
    options: &CodecOptions,
) -> Result<Inspection> {
    let request = Arc::new(PendingCall::new(request_id, action.as_str()));
    match action {
        Action::BootNotification => {
            decode_as::<BootNotificationResponse>(action, request, payload, options)
        }
        Action::DataTransfer => {
            decode_as::<DataTransferResponse>(action, request, payload, options)
        }
        Action::Heartbeat => decode_as::<HeartbeatResponse>(action, request, payload, options),
        Action::StatusNotification => {
            decode_as::<StatusNotificationResponse>(action, request, payload, options)
        }
    }
}

/// The envelope a transport would synthesize when `request_id` got no answer.
pub fn failed(action: Action, request_id: &str) -> Inspection {
    let request = Arc::new(PendingCall::new(request_id, action.as_str()));
    match action {
        Action::BootNotification => failed_as::<BootNotificationResponse>(action, request),
        Action::DataTransfer => failed_as::<DataTransferResponse>(action, request),
        Action::Heartbeat => failed_as::<HeartbeatResponse>(action, request),
        Action::StatusNotification => failed_as::<StatusNotificationResponse>(action, request),
    }
}

/// Field table vs. schema drift for every known action.
pub fn schema_check() -> Result<Vec<(Action, Vec<Drift>)>> {
    Action::ALL
        .into_iter()
        .map(|action| {
            let drift = match action {
                Action::BootNotification => schema::check::<BootNotificationResponse>()?,
                Action::DataTransfer => schema::check::<DataTransferResponse>()?,
                Action::Heartbeat => schema::check::<HeartbeatResponse>()?,
                Action::StatusNotification => schema::check::<StatusNotificationResponse>()?,
            };
            Ok((action, drift))
        })
        .collect()
}

pub fn render(obj: &JsonObject, pretty: bool) -> Result<String> {
    let res = if pretty {
        serde_json::to_string_pretty(obj)
    } else {
        serde_json::to_string(obj)
    };
    res.map_err(|e| OcppError::Internal(format!("json encode failed: {e}")))
}
