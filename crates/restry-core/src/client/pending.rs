use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;

use crate::callbacks::CallbackRegistry;
use crate::error::RestError;
use crate::request::{RequestDescriptor, RequestOptions};
use crate::response::{ClassifiedResponse, Headers};

use super::RestClient;

/// Boxed future driving one logical request to its terminal attempt.
pub type RequestFuture =
    Pin<Box<dyn Future<Output = Result<ClassifiedResponse, RestError>> + Send + 'static>>;

/// A logical request that has not been sent yet.
///
/// Register callbacks with the chainable `on_*` methods, then `.await` it.
/// The awaited result is the final attempt's classification: `Ok` on
/// success, `Err(RestError::Rejected)` for any other terminal outcome.
/// Callbacks fire exactly once, on whichever attempt ends the request.
#[must_use = "requests do nothing unless awaited"]
pub struct PendingRequest {
    client: RestClient,
    descriptor: RequestDescriptor,
    callbacks: CallbackRegistry,
}

impl PendingRequest {
    pub(crate) fn new(client: RestClient, descriptor: RequestDescriptor) -> Self {
        Self {
            client,
            descriptor,
            callbacks: CallbackRegistry::new(),
        }
    }

    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.descriptor.options = options;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.descriptor.options.headers.insert(name.into(), value.into());
        self
    }

    /// Called with `(response, headers, config)` when the request succeeds.
    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: Fn(&ClassifiedResponse, &Headers, &RequestDescriptor) + Send + Sync + 'static,
    {
        self.callbacks.push_success(Arc::new(f));
        self
    }

    /// Called when the request ends in an unhandled error without field
    /// errors, or in a 401 when no unauthorized hook is configured.
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&ClassifiedResponse, &Headers, &RequestDescriptor) + Send + Sync + 'static,
    {
        self.callbacks.push_error(Arc::new(f));
        self
    }

    /// Called when the request ends in an unhandled error carrying field errors.
    pub fn on_validation<F>(mut self, f: F) -> Self
    where
        F: Fn(&ClassifiedResponse, &Headers, &RequestDescriptor) + Send + Sync + 'static,
    {
        self.callbacks.push_validation(Arc::new(f));
        self
    }
}

impl IntoFuture for PendingRequest {
    type Output = Result<ClassifiedResponse, RestError>;
    type IntoFuture = RequestFuture;

    fn into_future(self) -> Self::IntoFuture {
        self.client.run_attempt(self.descriptor, self.callbacks)
    }
}
