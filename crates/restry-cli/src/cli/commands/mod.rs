//! CLI command handlers.

mod config;
mod request;

pub use config::run_config;
pub use request::{run_request, RequestArgs};
