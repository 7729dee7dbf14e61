//! BugMeNot Core - Foundation crate for the BugMeNot credential search engine.
//!
//! This crate provides the shared error types, configuration management and
//! logging setup that the scanner crate builds on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`logging`] - `tracing` subscriber installation
//!
//! # Example
//!
//! ```rust
//! use bugmenot_core::AppConfig;
//!
//! let config = AppConfig::default();
//! assert_eq!(config.query.base_url, "http://bugmenot.com");
//! assert_eq!(config.session.debounce_ms, 250);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, QueryConfig, SessionConfig};
pub use error::{ConfigError, ConfigResult, CoreError, Result};
pub use logging::init_tracing;
