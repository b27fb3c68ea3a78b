//! # blog-common
//!
//! Shared utilities including configuration, error handling, password hashing,
//! and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{hash_password, verify_password};
pub use config::{AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, StorageConfig};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{init_tracing, init_tracing_with_config, try_init_tracing, TracingConfig};
