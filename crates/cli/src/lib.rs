//! CLI utilities for the Modforge Android project tools
//!
//! Shared terminal output helpers used by the Modforge binaries.

#![warn(missing_docs)]

pub mod output;

pub use output::{Status, format_count, format_size, print_error};
