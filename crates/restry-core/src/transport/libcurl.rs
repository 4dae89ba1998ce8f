//! libcurl-backed transport.
//!
//! Runs a blocking `curl::easy::Easy` transfer inside `spawn_blocking`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::str;
use std::time::Duration;

use crate::config::TransportConfig;
use crate::request::{Method, RequestDescriptor};
use crate::response::RawResponse;

use super::parse::{decode_body, parse_headers};
use super::{Transport, TransportError};

#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    cfg: TransportConfig,
}

impl CurlTransport {
    pub fn new(cfg: TransportConfig) -> Self {
        Self { cfg }
    }
}

#[async_trait]
impl Transport for CurlTransport {
    async fn call(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        let cfg = self.cfg.clone();
        let request = request.clone();
        tokio::task::spawn_blocking(move || perform(&cfg, request))
            .await
            .map_err(|e| TransportError::Join(e.to_string()))?
    }
}

/// Default headers overlaid with per-request headers (case-insensitive names).
fn merged_headers(cfg: &TransportConfig, request: &RequestDescriptor) -> Vec<(String, String)> {
    let mut merged: HashMap<String, (String, String)> = HashMap::new();
    for (k, v) in cfg.default_headers.iter().chain(request.options.headers.iter()) {
        merged.insert(
            k.trim().to_ascii_lowercase(),
            (k.trim().to_string(), v.trim().to_string()),
        );
    }
    merged
        .entry("accept".to_string())
        .or_insert_with(|| ("Accept".to_string(), "application/json".to_string()));
    if request.body.is_some() {
        merged
            .entry("content-type".to_string())
            .or_insert_with(|| ("Content-Type".to_string(), "application/json".to_string()));
    }
    let mut out: Vec<(String, String)> = merged.into_values().collect();
    out.sort();
    out
}

fn perform(
    cfg: &TransportConfig,
    request: RequestDescriptor,
) -> Result<RawResponse, TransportError> {
    let payload = request.body.as_ref().map(serde_json::to_vec).transpose()?;

    let mut easy = curl::easy::Easy::new();
    easy.url(&request.url)?;
    match request.method {
        Method::Get => easy.get(true)?,
        Method::Post => easy.post(true)?,
        Method::Put => easy.custom_request("PUT")?,
        Method::Delete => easy.custom_request("DELETE")?,
    }
    match &payload {
        Some(bytes) => easy.post_fields_copy(bytes)?,
        None if request.method == Method::Post => easy.post_fields_copy(&[])?,
        None => {}
    }
    easy.follow_location(cfg.follow_redirects)?;
    easy.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))?;
    easy.timeout(
        request
            .options
            .timeout
            .unwrap_or(Duration::from_secs(cfg.timeout_secs)),
    )?;

    let mut list = curl::easy::List::new();
    for (k, v) in merged_headers(cfg, &request) {
        list.append(&format!("{}: {}", k, v))?;
    }
    easy.http_headers(list)?;

    let mut header_lines: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                header_lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    let status_code = u16::try_from(code)
        .map_err(|_| TransportError::Other(format!("invalid HTTP status {}", code)))?;
    tracing::trace!(
        method = %request.method,
        url = %request.url,
        status = status_code,
        "transport call"
    );

    Ok(RawResponse {
        status_code,
        headers: parse_headers(&header_lines),
        body: decode_body(&body),
        config: request,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestOptions;
    use serde_json::json;

    #[test]
    fn merged_headers_request_overrides_default() {
        let mut cfg = TransportConfig::default();
        cfg.default_headers.insert("X-Client".into(), "restry".into());
        cfg.default_headers.insert("Accept".into(), "text/plain".into());
        let request = RequestDescriptor::new(Method::Post, "http://h/x")
            .with_body(json!({}))
            .with_options(RequestOptions::default().with_header("accept", "application/xml"));
        let headers = merged_headers(&cfg, &request);
        assert!(headers.contains(&("accept".to_string(), "application/xml".to_string())));
        assert!(headers.contains(&("X-Client".to_string(), "restry".to_string())));
        assert!(headers.contains(&("Content-Type".to_string(), "application/json".to_string())));
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn merged_headers_without_body_has_no_content_type() {
        let request = RequestDescriptor::new(Method::Get, "http://h/x");
        let headers = merged_headers(&TransportConfig::default(), &request);
        assert_eq!(
            headers,
            vec![("Accept".to_string(), "application/json".to_string())]
        );
    }
}
