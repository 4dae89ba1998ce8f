//! Transport responses and their ServiceStack classification.

mod classify;
mod raw;
mod status;

pub use classify::{ClassifiedResponse, Outcome};
pub use raw::{Headers, RawResponse};
pub use status::{FieldError, ResponseStatus};
