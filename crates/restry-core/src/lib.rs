pub mod config;
pub mod logging;

pub mod callbacks;
pub mod client;
pub mod error;
pub mod location;
pub mod request;
pub mod response;
pub mod retry;
pub mod transport;

pub use client::{PendingRequest, RestClient, RestClientBuilder};
pub use config::RestConfig;
pub use error::RestError;
pub use request::{Method, RequestDescriptor, RequestOptions};
pub use response::{ClassifiedResponse, Outcome, RawResponse};
