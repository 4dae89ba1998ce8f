//! ServiceStack `responseStatus` error payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured error object a ServiceStack service returns under
/// `responseStatus` on failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseStatus {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub stack_trace: Option<String>,
    /// Field-level validation errors; empty when the failure is not a validation failure.
    #[serde(default)]
    pub errors: Vec<FieldError>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One field-level validation error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default, alias = "field")]
    pub field_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResponseStatus {
    /// Extract the `responseStatus` object from a response body.
    ///
    /// Returns `None` when the body has no `responseStatus` or it is not a
    /// JSON object. An object whose `errors` entry is malformed still yields a
    /// payload, just without field errors.
    pub fn from_body(body: &Value) -> Option<Self> {
        let obj = body.get("responseStatus")?.as_object()?;
        match serde_json::from_value::<ResponseStatus>(Value::Object(obj.clone())) {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::warn!("malformed responseStatus ({e}); ignoring field errors");
                let mut extra = obj.clone();
                extra.remove("errors");
                let mut text =
                    |key: &str| extra.remove(key).and_then(|v| v.as_str().map(String::from));
                let error_code = text("errorCode");
                let message = text("message");
                let stack_trace = text("stackTrace");
                Some(ResponseStatus {
                    error_code,
                    message,
                    stack_trace,
                    errors: Vec::new(),
                    extra,
                })
            }
        }
    }
}
