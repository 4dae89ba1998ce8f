#![allow(dead_code)]

pub mod json_server;

use async_trait::async_trait;
use restry_core::request::RequestDescriptor;
use restry_core::response::RawResponse;
use restry_core::retry::Timer;
use restry_core::transport::{Transport, TransportError};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Transport that answers from a fixed script and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<(u16, Value)>>,
    calls: Mutex<Vec<RequestDescriptor>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<(u16, Value)>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<RequestDescriptor> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn call(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        self.calls.lock().unwrap().push(request.clone());
        let (status, body) = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Other("script exhausted".into()))?;
        Ok(RawResponse::new(status, body, request.clone()).with_header("X-Attempt", "1"))
    }
}

/// Timer that records requested delays and returns immediately.
#[derive(Default)]
pub struct RecordingTimer {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingTimer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Timer for RecordingTimer {
    async fn sleep(&self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
    }
}

/// Shared counter for callback invocations.
#[derive(Clone, Default)]
pub struct Counter(Arc<Mutex<Vec<String>>>);

impl Counter {
    pub fn record(&self, tag: &str) {
        self.0.lock().unwrap().push(tag.to_string());
    }

    pub fn count(&self, tag: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|t| *t == tag).count()
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}
