//! siteserve: a static file server with health probes, and a stub
//! serverless invocation handler.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod invocation;
pub mod logger;
pub mod server;
