//! Decoding of the `{ "status": .., "result": .. }` response envelope.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::PostcodeError;

/// The wire shape of every API response.
///
/// `result` is `None` when the API sent `"result": null`. Whether that means
/// "no match" or "not found" is decided by each client method, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEnvelope<T> {
    /// Status echoed in the body, if present
    pub status: Option<u16>,
    /// The unwrapped result
    pub result: Option<T>,
}

impl<T: DeserializeOwned> ResultEnvelope<T> {
    /// Decodes an envelope from a response body.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::MalformedResponse`] if the body is not JSON,
    /// is not an object, has no `result` key, or `result` has the wrong shape.
    pub fn from_slice(body: &[u8]) -> Result<Self, PostcodeError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| PostcodeError::malformed(format!("body is not valid JSON: {e}")))?;

        let Value::Object(mut envelope) = value else {
            return Err(PostcodeError::malformed("body is not a JSON object"));
        };

        let status = envelope
            .get("status")
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok());

        let raw = envelope
            .remove("result")
            .ok_or_else(|| PostcodeError::malformed("envelope has no `result` field"))?;

        let result = serde_json::from_value::<Option<T>>(raw)
            .map_err(|e| PostcodeError::malformed(format!("unexpected `result` shape: {e}")))?;

        Ok(Self { status, result })
    }
}

/// Decodes a body and returns its `result`.
///
/// # Errors
///
/// See [`ResultEnvelope::from_slice`].
pub fn unwrap_result<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, PostcodeError> {
    ResultEnvelope::from_slice(body).map(|envelope| envelope.result)
}

/// Extracts the `error` message from a non-success response body, if any.
#[must_use]
pub fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("error")?.as_str().map(ToString::to_string)
}
