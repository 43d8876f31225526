//! HTTP API: server, routing, and the two protocol façades (REST and Object-RPC).

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
