use serde_json::Value;
use std::collections::HashMap;

use crate::request::RequestDescriptor;

/// Response headers, keyed by lower-cased header name.
pub type Headers = HashMap<String, String>;

/// What the transport hands back for any HTTP status: the status, headers,
/// decoded body, and the descriptor that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status_code: u16,
    pub headers: Headers,
    pub body: Value,
    pub config: RequestDescriptor,
}

impl RawResponse {
    pub fn new(status_code: u16, body: Value, config: RequestDescriptor) -> Self {
        Self {
            status_code,
            headers: Headers::new(),
            body,
            config,
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }
}
