//! HTTP API: server, routing, and request/response mapping.
//!
//! Each request is one interaction pass. The router holds no state, so
//! nothing a request changes is visible to the next one.

pub mod app;
pub mod config;
pub mod middleware;
