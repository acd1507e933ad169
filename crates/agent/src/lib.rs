#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Typed client for the coffee order service.
//!
//! All HTTP status interpretation lives here: callers get either a decoded
//! [`Order`](order_core::Order) or exactly one [`OrderServiceError`].

pub mod client;
pub mod config;
pub mod error;

pub use client::OrderServiceClient;
pub use config::ClientConfig;
pub use error::OrderServiceError;
