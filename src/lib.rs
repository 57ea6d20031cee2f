//! Payment API starter service
//!
//! This library provides a small, production-shaped payment API: a cached
//! configuration provider, idempotent payment and order processing, and a
//! warp HTTP surface, organized in layers.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod workers;

pub use config::{Settings, SettingsProvider};
pub use infrastructure::http::server::HttpServer;
pub use shared::error::{AppError, AppResult};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;
