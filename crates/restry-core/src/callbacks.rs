//! Callbacks registered against one logical request.
//!
//! The registry is carried from attempt to attempt: when a request is
//! retried, [`CallbackRegistry::carry_over`] copies every list onto the new
//! attempt so callers see their callbacks fire on whichever attempt ends the
//! request.

use std::fmt;
use std::sync::Arc;

use crate::request::RequestDescriptor;
use crate::response::{ClassifiedResponse, Headers};

/// Called with `(response, headers, config)`.
pub type ResponseCallback =
    Arc<dyn Fn(&ClassifiedResponse, &Headers, &RequestDescriptor) + Send + Sync>;

#[derive(Clone, Default)]
pub struct CallbackRegistry {
    success: Vec<ResponseCallback>,
    error: Vec<ResponseCallback>,
    validation: Vec<ResponseCallback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_success(&mut self, f: ResponseCallback) {
        self.success.push(f);
    }

    pub fn push_error(&mut self, f: ResponseCallback) {
        self.error.push(f);
    }

    pub fn push_validation(&mut self, f: ResponseCallback) {
        self.validation.push(f);
    }

    /// Fresh registry for a retry attempt holding every callback registered
    /// so far, in original registration order.
    pub fn carry_over(&self) -> Self {
        let mut next = Self::new();
        for f in &self.success {
            next.push_success(Arc::clone(f));
        }
        for f in &self.error {
            next.push_error(Arc::clone(f));
        }
        for f in &self.validation {
            next.push_validation(Arc::clone(f));
        }
        next
    }

    pub fn notify_success(&self, response: &ClassifiedResponse) {
        Self::fan_out(&self.success, response);
    }

    pub fn notify_error(&self, response: &ClassifiedResponse) {
        Self::fan_out(&self.error, response);
    }

    pub fn notify_validation(&self, response: &ClassifiedResponse) {
        Self::fan_out(&self.validation, response);
    }

    /// (success, error, validation) list lengths.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.success.len(), self.error.len(), self.validation.len())
    }

    fn fan_out(list: &[ResponseCallback], response: &ClassifiedResponse) {
        for f in list {
            f(response, response.headers(), response.config());
        }
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (success, error, validation) = self.counts();
        f.debug_struct("CallbackRegistry")
            .field("success", &success)
            .field("error", &error)
            .field("validation", &validation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;
    use crate::response::RawResponse;
    use crate::retry::RetryPolicy;
    use std::sync::Mutex;

    fn response() -> ClassifiedResponse {
        let raw = RawResponse::new(
            200,
            serde_json::Value::Null,
            RequestDescriptor::new(Method::Get, "/x"),
        );
        ClassifiedResponse::classify(raw, &RetryPolicy::default())
    }

    fn recorder(log: &Arc<Mutex<Vec<String>>>, tag: &str) -> ResponseCallback {
        let log = Arc::clone(log);
        let tag = tag.to_string();
        Arc::new(
            move |_: &ClassifiedResponse, _: &Headers, _: &RequestDescriptor| {
                log.lock().unwrap().push(tag.clone())
            },
        )
    }

    #[test]
    fn fan_out_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut reg = CallbackRegistry::new();
        reg.push_success(recorder(&log, "a"));
        reg.push_success(recorder(&log, "b"));
        reg.push_error(recorder(&log, "err"));
        reg.notify_success(&response());
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn carry_over_copies_every_list_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut reg = CallbackRegistry::new();
        reg.push_success(recorder(&log, "s1"));
        reg.push_error(recorder(&log, "e1"));
        reg.push_validation(recorder(&log, "v1"));
        reg.push_success(recorder(&log, "s2"));

        let next = reg.carry_over();
        assert_eq!(next.counts(), (2, 1, 1));

        let r = response();
        next.notify_success(&r);
        next.notify_error(&r);
        next.notify_validation(&r);
        assert_eq!(*log.lock().unwrap(), vec!["s1", "s2", "e1", "v1"]);
    }

    #[test]
    fn callbacks_receive_headers_and_config() {
        let seen = Arc::new(Mutex::new(None));
        let mut reg = CallbackRegistry::new();
        let seen_cb = Arc::clone(&seen);
        reg.push_success(Arc::new(
            move |_: &ClassifiedResponse, _: &Headers, config: &RequestDescriptor| {
                *seen_cb.lock().unwrap() = Some(config.url.clone());
            },
        ));
        reg.notify_success(&response());
        assert_eq!(seen.lock().unwrap().as_deref(), Some("/x"));
    }
}
