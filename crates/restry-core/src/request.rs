//! Request descriptor: everything needed to (re)issue one logical request.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// HTTP method supported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request transport options. Opaque to the classifier and executor;
/// only the transport reads them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Extra request headers (name -> value).
    pub headers: HashMap<String, String>,
    /// Overall timeout for this request; `None` uses the transport default.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// One logical request. The executor re-issues the same descriptor on retry,
/// with `collision_count` bumped once per retry.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    pub options: RequestOptions,
    /// Number of retries already made for this logical request.
    pub collision_count: u32,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            options: RequestOptions::default(),
            collision_count: 0,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}
