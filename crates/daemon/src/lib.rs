#![forbid(unsafe_code)]

//! Order service: validates, persists and serves coffee orders over HTTP.

pub mod api;
pub mod config;
pub mod store;
