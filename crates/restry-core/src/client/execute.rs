//! The retrying executor.
//!
//! One loop iteration per physical attempt. A retryable response sleeps for
//! the backoff delay, then the next iteration runs with the bumped descriptor
//! and a carried-over copy of the callback registry. Every other response is
//! terminal and fans out to the matching callbacks once.

use crate::callbacks::CallbackRegistry;
use crate::error::RestError;
use crate::request::RequestDescriptor;
use crate::response::ClassifiedResponse;
use crate::retry::RetryDecision;

use super::pending::RequestFuture;
use super::{fix_url, RestClient};

impl RestClient {
    pub(crate) fn run_attempt(
        &self,
        mut descriptor: RequestDescriptor,
        mut callbacks: CallbackRegistry,
    ) -> RequestFuture {
        let client = self.clone();
        Box::pin(async move {
            let inner = &client.inner;
            loop {
                descriptor.url = fix_url(&inner.config.url_prefix, &descriptor.url);

                let raw = match inner.transport.call(&descriptor).await {
                    Ok(raw) => raw,
                    Err(e) => {
                        tracing::warn!(
                            method = %descriptor.method,
                            url = %descriptor.url,
                            "transport failed: {e}"
                        );
                        return Err(RestError::Transport(e));
                    }
                };
                let response = ClassifiedResponse::classify(raw, &inner.policy);
                response.log_summary();

                match inner.policy.decide(&response) {
                    RetryDecision::RetryAfter(delay) => {
                        tracing::info!(
                            status = response.status_code(),
                            collisions = response.collision_count(),
                            delay_ms = delay.as_millis() as u64,
                            url = %response.config().url,
                            "transient server error; retrying"
                        );
                        // Copy the callbacks onto the next attempt before it is dispatched.
                        callbacks = callbacks.carry_over();
                        descriptor = response.config().clone();
                        inner.timer.sleep(delay).await;
                    }
                    RetryDecision::NoRetry => return client.finish(response, &callbacks),
                }
            }
        })
    }

    /// Fan a non-retryable response out to its callbacks and the unauthorized hook.
    fn finish(
        &self,
        response: ClassifiedResponse,
        callbacks: &CallbackRegistry,
    ) -> Result<ClassifiedResponse, RestError> {
        if response.is_success() {
            callbacks.notify_success(&response);
            return Ok(response);
        }
        if response.is_unauthenticated() {
            match &self.inner.unauthorized_handler {
                Some(handler) => {
                    tracing::debug!(
                        url = %response.config().url,
                        "401; invoking unauthorized handler"
                    );
                    handler(&response, self.inner.location.as_ref());
                }
                None => callbacks.notify_error(&response),
            }
        } else if response.has_validation_error() {
            callbacks.notify_validation(&response);
        } else {
            callbacks.notify_error(&response);
        }
        Err(RestError::Rejected(Box::new(response)))
    }
}
