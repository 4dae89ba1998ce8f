//! HTTP transport seam.
//!
//! The executor only needs "send this descriptor, hand back status, headers,
//! body and the descriptor". Any HTTP status, including 4xx/5xx, comes back as
//! `Ok(RawResponse)`; `Err` is reserved for requests that produced no response.

mod libcurl;
mod parse;

use async_trait::async_trait;

use crate::request::RequestDescriptor;
use crate::response::RawResponse;

pub use libcurl::CurlTransport;
pub use parse::{decode_body, parse_headers};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError>;
}

/// Failure to obtain any response from the server.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("curl: {0}")]
    Curl(#[from] ::curl::Error),
    #[error("could not encode request body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("transport task failed: {0}")]
    Join(String),
    #[error("{0}")]
    Other(String),
}
