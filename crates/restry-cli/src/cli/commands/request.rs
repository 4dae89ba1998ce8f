//! `restry get|post|put|delete` – send one request and print the outcome.

use anyhow::{bail, Context, Result};
use restry_core::location::{Location, MemoryLocation};
use restry_core::request::{Method, RequestDescriptor, RequestOptions};
use restry_core::{ClassifiedResponse, RestClient, RestConfig, RestError};
use serde_json::Value;
use std::sync::Arc;

/// Arguments shared by the request subcommands.
#[derive(Debug)]
pub struct RequestArgs {
    pub method: Method,
    pub url: String,
    pub data: Option<String>,
    pub headers: Vec<String>,
}

impl RequestArgs {
    pub fn new(method: Method, url: String, data: Option<String>, headers: Vec<String>) -> Self {
        Self {
            method,
            url,
            data,
            headers,
        }
    }

    fn descriptor(&self) -> Result<RequestDescriptor> {
        let mut options = RequestOptions::default();
        for raw in &self.headers {
            let (name, value) = parse_header(raw)?;
            options = options.with_header(name, value);
        }
        let mut descriptor =
            RequestDescriptor::new(self.method, self.url.clone()).with_options(options);
        if matches!(self.method, Method::Post | Method::Put) {
            let body = match &self.data {
                Some(text) => serde_json::from_str(text).context("--data is not valid JSON")?,
                None => Value::Null,
            };
            descriptor = descriptor.with_body(body);
        }
        Ok(descriptor)
    }
}

/// Parse a `Name: value` header argument.
pub fn parse_header(raw: &str) -> Result<(String, String)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("invalid header {:?}; expected \"Name: value\"", raw),
    }
}

fn print_body(response: &ClassifiedResponse) -> Result<()> {
    if !response.body().is_null() {
        println!("{}", serde_json::to_string_pretty(response.body())?);
    }
    Ok(())
}

/// Returns whether the request ended in success.
pub async fn run_request(cfg: &RestConfig, args: RequestArgs) -> Result<bool> {
    let location = Arc::new(MemoryLocation::default());
    let client = RestClient::builder(cfg.clone())
        .location(location.clone())
        .unauthorized_handler(|response, location| {
            tracing::warn!(url = %response.config().url, "authentication required");
            location.set_path("/login");
        })
        .build();

    let result = client
        .execute(args.descriptor()?)
        .on_success(|r, _, config| {
            println!("{} {} -> {}", config.method, config.url, r.status_code());
        })
        .on_validation(|r, _, _| {
            eprintln!("validation failed (HTTP {}):", r.status_code());
            for e in r.validation_errors().unwrap_or_default() {
                eprintln!(
                    "  {}: {}",
                    e.field_name.as_deref().unwrap_or("-"),
                    e.message.as_deref().unwrap_or("")
                );
            }
        })
        .on_error(|r, _, config| {
            let message = r
                .error_payload()
                .and_then(|p| p.message.as_deref())
                .unwrap_or("no error details");
            eprintln!(
                "{} {} failed (HTTP {}): {}",
                config.method,
                config.url,
                r.status_code(),
                message
            );
        })
        .await;

    match result {
        Ok(response) => {
            print_body(&response)?;
            Ok(true)
        }
        Err(RestError::Rejected(response)) => {
            if response.is_unauthenticated() {
                eprintln!("not authenticated; redirected to {}", location.path());
            }
            print_body(&response)?;
            Ok(false)
        }
        Err(e @ RestError::Transport(_)) => Err(e).context("request failed"),
    }
}
