//! REST client: URL fixing, callback registration, and the retrying executor.

mod execute;
mod pending;
mod url;

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::config::RestConfig;
use crate::location::{Location, MemoryLocation};
use crate::request::{Method, RequestDescriptor};
use crate::response::ClassifiedResponse;
use crate::retry::{RetryPolicy, Timer, TokioTimer};
use crate::transport::{CurlTransport, Transport};

pub use pending::{PendingRequest, RequestFuture};
pub use url::fix_url;

/// Process-wide hook for 401 responses. Receives the response and the
/// navigation handle (typically to redirect to a login route).
pub type UnauthorizedHandler = Arc<dyn Fn(&ClassifiedResponse, &dyn Location) + Send + Sync>;

struct ClientInner {
    config: RestConfig,
    policy: RetryPolicy,
    transport: Arc<dyn Transport>,
    timer: Arc<dyn Timer>,
    location: Arc<dyn Location>,
    unauthorized_handler: Option<UnauthorizedHandler>,
}

/// Cheap to clone; clones share the same configuration and collaborators.
#[derive(Clone)]
pub struct RestClient {
    inner: Arc<ClientInner>,
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("config", &self.inner.config)
            .field("unauthorized_handler", &self.inner.unauthorized_handler.is_some())
            .finish()
    }
}

impl RestClient {
    pub fn builder(config: RestConfig) -> RestClientBuilder {
        RestClientBuilder::new(config)
    }

    pub fn config(&self) -> &RestConfig {
        &self.inner.config
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.inner.policy
    }

    pub fn fix_url(&self, url: &str) -> String {
        fix_url(&self.inner.config.url_prefix, url)
    }

    /// Start a logical request for `descriptor`. Nothing is sent until the
    /// returned request is awaited.
    pub fn execute(&self, descriptor: RequestDescriptor) -> PendingRequest {
        PendingRequest::new(self.clone(), descriptor)
    }

    pub fn get(&self, url: &str) -> PendingRequest {
        self.execute(RequestDescriptor::new(Method::Get, url))
    }

    pub fn delete(&self, url: &str) -> PendingRequest {
        self.execute(RequestDescriptor::new(Method::Delete, url))
    }

    /// POST with a JSON body; `None` sends JSON `null`.
    pub fn post(&self, url: &str, body: Option<Value>) -> PendingRequest {
        let body = body.unwrap_or(Value::Null);
        self.execute(RequestDescriptor::new(Method::Post, url).with_body(body))
    }

    /// PUT with a JSON body; `None` sends JSON `null`.
    pub fn put(&self, url: &str, body: Option<Value>) -> PendingRequest {
        let body = body.unwrap_or(Value::Null);
        self.execute(RequestDescriptor::new(Method::Put, url).with_body(body))
    }
}

/// Assembles a [`RestClient`] from a config and optional collaborators.
/// Defaults: libcurl transport, tokio timer, in-memory location, no
/// unauthorized hook.
pub struct RestClientBuilder {
    config: RestConfig,
    transport: Option<Arc<dyn Transport>>,
    timer: Option<Arc<dyn Timer>>,
    location: Option<Arc<dyn Location>>,
    unauthorized_handler: Option<UnauthorizedHandler>,
}

impl RestClientBuilder {
    pub fn new(config: RestConfig) -> Self {
        Self {
            config,
            transport: None,
            timer: None,
            location: None,
            unauthorized_handler: None,
        }
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn timer(mut self, timer: Arc<dyn Timer>) -> Self {
        self.timer = Some(timer);
        self
    }

    pub fn location(mut self, location: Arc<dyn Location>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn unauthorized_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ClassifiedResponse, &dyn Location) + Send + Sync + 'static,
    {
        self.unauthorized_handler = Some(Arc::new(handler));
        self
    }

    pub fn build(self) -> RestClient {
        let policy = RetryPolicy::from_config(&self.config);
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(CurlTransport::new(self.config.transport_or_default())));
        RestClient {
            inner: Arc::new(ClientInner {
                policy,
                transport,
                timer: self.timer.unwrap_or_else(|| Arc::new(TokioTimer)),
                location: self
                    .location
                    .unwrap_or_else(|| Arc::new(MemoryLocation::default())),
                unauthorized_handler: self.unauthorized_handler,
                config: self.config,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_derives_policy_from_config() {
        let cfg = RestConfig::default().with_max_retries(7).with_url_prefix("/api/");
        let client = RestClient::builder(cfg).build();
        assert_eq!(client.policy().max_retries, 7);
        assert_eq!(client.fix_url("/widgets"), "/api/widgets");
    }

    #[test]
    fn helpers_fix_method_and_body() {
        let client = RestClient::builder(RestConfig::default()).build();
        let post = client.post("/w", None);
        assert_eq!(post.descriptor().method, Method::Post);
        assert_eq!(post.descriptor().body, Some(Value::Null));

        let put = client.put("/w/1", Some(serde_json::json!({"n": 1})));
        assert_eq!(put.descriptor().method, Method::Put);
        assert_eq!(put.descriptor().body, Some(serde_json::json!({"n": 1})));

        let get = client.get("/w");
        assert_eq!(get.descriptor().method, Method::Get);
        assert!(get.descriptor().body.is_none());

        let delete = client.delete("/w/1");
        assert_eq!(delete.descriptor().method, Method::Delete);
        assert_eq!(delete.descriptor().url, "/w/1");
    }
}
