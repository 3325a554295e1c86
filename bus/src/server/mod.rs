//! HTTP server adapter for the message bus.
//!
//! A thin protocol binding: handlers parse requests into the facade's
//! typed request structs, call one bus operation, and render the result
//! into a JSON envelope. No business logic lives here.

mod config;
mod error;
mod handlers;
mod http;
mod metrics;
mod request;
mod response;

pub use config::{BusServerConfig, CliArgs};
pub use http::BusServer;
