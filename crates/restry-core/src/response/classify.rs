//! Wrap a raw transport response into a typed ServiceStack outcome.

use serde_json::Value;

use crate::request::RequestDescriptor;
use crate::retry::{classify_http_status, RetryPolicy, StatusClass};

use super::raw::{Headers, RawResponse};
use super::status::{FieldError, ResponseStatus};

/// Terminal (or retry) category of a classified response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Unhandled error carrying field-level validation errors.
    ValidationError,
    /// Any other non-success, non-retryable, non-auth failure.
    UnhandledError,
    Unauthenticated,
    /// 500/503 still within the retry budget.
    TransientServerError,
}

/// Immutable view over one transport response.
///
/// Built only through [`ClassifiedResponse::classify`]. When the response is
/// retryable, the collision counter in the echoed request config has already
/// been bumped, so `collision_count()` reports the count the *next* attempt
/// will carry. Eligibility itself was decided on the count before the bump.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedResponse {
    status_code: u16,
    success: bool,
    body: Value,
    error_payload: Option<ResponseStatus>,
    retryable: bool,
    headers: Headers,
    config: RequestDescriptor,
}

impl ClassifiedResponse {
    pub fn classify(raw: RawResponse, policy: &RetryPolicy) -> Self {
        let RawResponse {
            status_code,
            headers,
            body,
            mut config,
        } = raw;

        let success = classify_http_status(status_code) == StatusClass::Success;
        let error_payload = if success {
            None
        } else {
            ResponseStatus::from_body(&body)
        };

        // Two steps, in this order: eligibility on the current count, then bump.
        let retryable = policy.is_eligible(status_code, config.collision_count);
        if retryable {
            config.collision_count = config.collision_count.saturating_add(1);
        }

        Self {
            status_code,
            success,
            body,
            error_payload,
            retryable,
            headers,
            config,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Response body, present only on success.
    pub fn data(&self) -> Option<&Value> {
        self.success.then_some(&self.body)
    }

    /// Raw decoded body regardless of outcome.
    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn error_payload(&self) -> Option<&ResponseStatus> {
        self.error_payload.as_ref()
    }

    /// Field errors; `Some` only when non-empty.
    pub fn validation_errors(&self) -> Option<&[FieldError]> {
        self.error_payload
            .as_ref()
            .map(|p| p.errors.as_slice())
            .filter(|errors| !errors.is_empty())
    }

    pub fn has_validation_error(&self) -> bool {
        self.validation_errors().is_some()
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    pub fn is_unauthenticated(&self) -> bool {
        classify_http_status(self.status_code) == StatusClass::Unauthenticated
    }

    pub fn is_unhandled_error(&self) -> bool {
        !self.success && !self.is_unauthenticated() && !self.retryable
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The request descriptor echoed by the transport, counter already bumped
    /// when retryable. Re-issuing this descriptor is how a retry happens.
    pub fn config(&self) -> &RequestDescriptor {
        &self.config
    }

    pub fn collision_count(&self) -> u32 {
        self.config.collision_count
    }

    pub fn outcome(&self) -> Outcome {
        if self.success {
            Outcome::Success
        } else if self.is_unauthenticated() {
            Outcome::Unauthenticated
        } else if self.retryable {
            Outcome::TransientServerError
        } else if self.has_validation_error() {
            Outcome::ValidationError
        } else {
            Outcome::UnhandledError
        }
    }

    /// Diagnostic dump of the classification flags.
    pub fn log_summary(&self) {
        tracing::debug!(
            status = self.status_code,
            success = self.success,
            has_validation_error = self.has_validation_error(),
            is_unhandled_error = self.is_unhandled_error(),
            is_unauthenticated = self.is_unauthenticated(),
            is_retryable = self.retryable,
            collisions = self.collision_count(),
            url = %self.config.url,
            "classified response"
        );
    }
}
