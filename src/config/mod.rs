//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions and TOML loading
//! - [`defaults`]: serde default value helpers
//! - [`validation`]: startup checks that report every problem at once

mod defaults;
mod types;
mod validation;

pub use types::{
    Config, ConfigError, IdentityConfig, ReconnectConfig, ServerConfig, SolusConfig,
    TimeoutsConfig,
};
pub use validation::{ValidationError, validate};
