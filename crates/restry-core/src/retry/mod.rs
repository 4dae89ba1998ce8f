//! Retry and backoff policy.
//!
//! Status classification (which codes are transient), the eligibility gate
//! against the collision counter, and the randomized exponential backoff
//! live here so the executor and the response classifier share one policy.

mod classify;
mod policy;
mod timer;

pub use classify::{classify_http_status, StatusClass};
pub use policy::{RetryDecision, RetryPolicy, BACKOFF_BASE_MS, BACKOFF_FACTOR};
pub use timer::{Timer, TokioTimer};
