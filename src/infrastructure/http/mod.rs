//! HTTP layer
//!
//! Warp-based HTTP surface: request handlers, route composition, and the
//! server wiring.

pub mod handlers;
pub mod routes;
pub mod server;

pub use server::HttpServer;
