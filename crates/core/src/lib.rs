//! Core utilities for the Modforge Android project tools
//!
//! This crate provides shared functionality used across the Modforge crates:
//!
//! - **Error handling**: structured errors with codes, context, and recovery
//!   suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **Validation**: group-identifier, namespace, and API-level checks
//! - **Telemetry**: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,no_run
//! use modforge_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! for module in &config.schema.modules {
//!     println!("{} ({})", module.name, module.group);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod telemetry;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, ModuleConfig, PluginKind};
    pub use crate::error::{Error, ErrorCode, Result, ResultExt, exit_codes};
    pub use crate::validation::ValidationResult;
}
