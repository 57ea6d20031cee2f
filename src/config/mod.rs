//! Configuration management module
//!
//! This module handles all configuration concerns: the settings schema and
//! its validation, and the process-wide cached settings provider.

pub mod provider;
pub mod settings;
pub mod validation;

pub use provider::SettingsProvider;
pub use settings::Settings;
pub use validation::ConfigValidator;
