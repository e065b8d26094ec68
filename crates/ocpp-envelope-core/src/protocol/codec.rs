//! Response codec: JSON object <-> [`Response`].
//!
//! Decoding runs the body's field table, then `signatures`, then `customData`,
//! and stops at the first failure. Encoding emits the same order and leaves out
//! every absent or empty field. Both directions accept caller interceptors that
//! replace the produced value.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use super::custom_data::{optional_custom_data, CustomData};
use super::envelope::{Response, ResponseBody};
use super::field::{self, FieldError, JsonObject};
use super::request::Request;
use super::signature::{optional_signatures, Signature, SIGNATURES};
use crate::error::{ErrorCode, OcppError, Result};

/// Post-processes (or replaces) a freshly decoded response.
pub type CustomParser<'a, R, M> = &'a dyn Fn(&Value, Response<R, M>) -> Response<R, M>;
/// Post-processes (or replaces) an encoded response object.
pub type CustomSerializer<'a, R, M> = &'a dyn Fn(&Response<R, M>, JsonObject) -> JsonObject;
pub type SignatureSerializer<'a> = &'a dyn Fn(&Signature, JsonObject) -> JsonObject;
pub type CustomDataSerializer<'a> = &'a dyn Fn(&CustomData, JsonObject) -> JsonObject;

/// Decode-time switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecOptions {
    /// Reject keys outside the declared field set (`additionalProperties: false`),
    /// at the top level and inside typed nested objects. `customData` stays open.
    #[serde(default)]
    pub reject_unknown_fields: bool,
}

/// Encode interceptors, all optional.
pub struct Serializers<'a, R, M> {
    pub response: Option<CustomSerializer<'a, R, M>>,
    pub signature: Option<SignatureSerializer<'a>>,
    pub custom_data: Option<CustomDataSerializer<'a>>,
}

impl<R, M> Default for Serializers<'_, R, M> {
    fn default() -> Self {
        Self {
            response: None,
            signature: None,
            custom_data: None,
        }
    }
}

impl<'a, R, M> Serializers<'a, R, M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn response(mut self, custom: CustomSerializer<'a, R, M>) -> Self {
        self.response = Some(custom);
        self
    }

    pub fn signature(mut self, custom: SignatureSerializer<'a>) -> Self {
        self.signature = Some(custom);
        self
    }

    pub fn custom_data(mut self, custom: CustomDataSerializer<'a>) -> Self {
        self.custom_data = Some(custom);
        self
    }
}

fn decode_error<M: ResponseBody>(code: ErrorCode, detail: impl std::fmt::Display) -> OcppError {
    OcppError::Decode {
        code,
        message: format!(
            "The given JSON representation of a {} response is invalid: {detail}",
            M::ACTION
        ),
    }
}

fn is_known_key<M: ResponseBody>(key: &str) -> bool {
    key == SIGNATURES || key == "customData" || M::FIELDS.iter().any(|f| f.name == key)
}

fn decode_object<R, M: ResponseBody>(
    request: Arc<R>,
    obj: &JsonObject,
    options: &CodecOptions,
) -> std::result::Result<Response<R, M>, FieldError> {
    let body = field::decode_table::<M>(obj, M::FIELDS, options)?;
    let signatures = optional_signatures(obj, options)?.unwrap_or_default();
    let custom_data = optional_custom_data(obj)?;

    if options.reject_unknown_fields {
        if let Some(key) = obj.keys().find(|k| !is_known_key::<M>(k)) {
            return Err(FieldError::UnknownField(key.clone()));
        }
    }

    Ok(Response::from_parts(request, body, signatures, custom_data))
}

impl<R: Request, M: ResponseBody> Response<R, M> {
    /// Decode `payload` as the response to `request`.
    pub fn try_parse(request: Arc<R>, payload: &Value) -> Result<Self> {
        Self::try_parse_with(request, payload, None, &CodecOptions::default())
    }

    /// Decode with an optional interceptor and explicit options.
    ///
    /// The interceptor only runs after the payload decoded cleanly; its return
    /// value is the result.
    pub fn try_parse_with(
        request: Arc<R>,
        payload: &Value,
        custom: Option<CustomParser<'_, R, M>>,
        options: &CodecOptions,
    ) -> Result<Self> {
        if request.action() != M::ACTION {
            tracing::warn!(
                request_id = %request.request_id(),
                request_action = request.action(),
                response_action = M::ACTION,
                "decoding response for a request of another action"
            );
        }

        let Some(obj) = payload.as_object() else {
            let err = decode_error::<M>(
                ErrorCode::FormationViolation,
                format!("expected a JSON object, found {}", field::json_kind(payload)),
            );
            tracing::debug!(
                action = M::ACTION,
                code = err.error_code().as_str(),
                "response rejected"
            );
            return Err(err);
        };

        let decoded = decode_object::<R, M>(request, obj, options).map_err(|e| {
            tracing::debug!(
                action = M::ACTION,
                field = e.field_name(),
                code = e.error_code().as_str(),
                "response rejected"
            );
            decode_error::<M>(e.error_code(), e)
        })?;

        Ok(match custom {
            Some(custom) => {
                tracing::trace!(action = M::ACTION, "custom parser applied");
                custom(payload, decoded)
            }
            None => decoded,
        })
    }

    /// Decode JSON text; unparsable text is a `FormationViolation`.
    pub fn try_parse_text(request: Arc<R>, text: &str) -> Result<Self> {
        let payload: Value = serde_json::from_str(text).map_err(|e| {
            tracing::debug!(action = M::ACTION, error = %e, "response is not JSON");
            decode_error::<M>(ErrorCode::FormationViolation, format!("not valid JSON: {e}"))
        })?;
        Self::try_parse(request, &payload)
    }

    /// Decode a payload the caller has already validated.
    ///
    /// # Panics
    ///
    /// Panics with a construction failure when [`Response::try_parse_with`]
    /// rejects the payload.
    #[allow(clippy::panic)]
    pub fn parse(
        request: Arc<R>,
        payload: &Value,
        custom: Option<CustomParser<'_, R, M>>,
    ) -> Self {
        match Self::try_parse_with(request, payload, custom, &CodecOptions::default()) {
            Ok(response) => response,
            Err(e) => panic!("{}", OcppError::Construction(e.to_string())),
        }
    }
}

impl<R, M: ResponseBody> Response<R, M> {
    pub fn to_json(&self) -> JsonObject {
        self.to_json_with(&Serializers::default())
    }

    /// Encode, letting `serializers` rewrite nested objects and the result.
    pub fn to_json_with(&self, serializers: &Serializers<'_, R, M>) -> JsonObject {
        let mut out = JsonObject::new();
        field::encode_table(self.body(), M::FIELDS, serializers.custom_data, &mut out);

        if !self.signatures().is_empty() {
            out.insert(
                SIGNATURES.to_owned(),
                self.signatures()
                    .to_json_with(serializers.signature, serializers.custom_data),
            );
        }
        if let Some(cd) = self.custom_data() {
            out.insert(
                "customData".to_owned(),
                Value::Object(cd.to_json_with(serializers.custom_data)),
            );
        }

        match serializers.response {
            Some(custom) => {
                tracing::trace!(action = M::ACTION, "custom serializer applied");
                custom(self, out)
            }
            None => out,
        }
    }
}
