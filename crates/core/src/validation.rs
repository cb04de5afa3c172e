//! Validation for configuration values
//!
//! Checks the handful of formats this tool cares about:
//! - Reverse-DNS group identifiers and resource namespaces
//! - Android API levels
//! - Java language versions

use crate::error::{Error, ErrorCode, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Reverse-DNS identifier: at least two dot-separated segments, each starting
/// with a letter.
static REVERSE_DNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$").unwrap());

/// Lowest API level the configurator will accept
pub const MIN_API_LEVEL: u32 = 21;

/// Highest API level the configurator will accept
pub const MAX_API_LEVEL: u32 = 40;

/// Java versions the platform plugin understands
pub const SUPPORTED_JAVA_VERSIONS: &[&str] = &["8", "11", "17", "21"];

/// Check whether a string is a valid reverse-DNS group identifier
pub fn is_valid_group_id(value: &str) -> bool {
    REVERSE_DNS.is_match(value)
}

/// Check whether a string is a valid resource namespace
pub fn is_valid_namespace(value: &str) -> bool {
    // Namespaces share the group-identifier grammar.
    REVERSE_DNS.is_match(value)
}

/// Validate a group identifier, with a suggestion on failure
pub fn validate_group_id(value: &str) -> Result<()> {
    if is_valid_group_id(value) {
        Ok(())
    } else {
        Err(
            Error::new(ErrorCode::InvalidFormat, format!("Invalid group identifier: {}", value))
                .with_suggestion("Use a reverse-DNS identifier, e.g. com.example.app"),
        )
    }
}

/// Validate a resource namespace
pub fn validate_namespace(value: &str) -> Result<()> {
    if is_valid_namespace(value) {
        Ok(())
    } else {
        Err(
            Error::new(ErrorCode::InvalidFormat, format!("Invalid namespace: {}", value))
                .with_suggestion("Use a reverse-DNS identifier, e.g. com.example.app"),
        )
    }
}

/// Validate an Android API level
pub fn validate_api_level(level: u32) -> Result<()> {
    if (MIN_API_LEVEL..=MAX_API_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(Error::invalid_api_level(level))
    }
}

/// Validate a Java language version string
pub fn validate_java_version(value: &str) -> Result<()> {
    if SUPPORTED_JAVA_VERSIONS.contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid_java_version(value))
    }
}

/// A single validation issue, tied to the field that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Accumulated validation issues
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all issues
    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    /// Record an issue against a field
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Record the failure of a field-level check, if any
    pub fn check(&mut self, field: &str, outcome: Result<()>) {
        if let Err(e) = outcome {
            self.add_error(field, e.message);
        }
    }

    /// Convert to Result type
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
            Err(Error::new(
                ErrorCode::ConfigValidationError,
                format!("Validation failed: {}", messages.join("; ")),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_group_ids() {
        assert!(is_valid_group_id("com.example.app"));
        assert!(is_valid_group_id("io.modforge.sample_plugin"));
        assert!(is_valid_group_id("dev.a1.b2.c3"));
    }

    #[test]
    fn test_invalid_group_ids() {
        assert!(!is_valid_group_id("app"));
        assert!(!is_valid_group_id("com..example"));
        assert!(!is_valid_group_id("com.1example"));
        assert!(!is_valid_group_id(""));
        assert!(!is_valid_group_id("com.example."));
    }

    #[test]
    fn test_api_level_bounds() {
        assert!(validate_api_level(MIN_API_LEVEL).is_ok());
        assert!(validate_api_level(36).is_ok());
        assert!(validate_api_level(MAX_API_LEVEL).is_ok());
        assert!(validate_api_level(20).is_err());
        assert!(validate_api_level(99).is_err());
    }

    #[test]
    fn test_java_versions() {
        assert!(validate_java_version("17").is_ok());
        assert!(validate_java_version("21").is_ok());
        assert!(validate_java_version("9").is_err());
    }

    #[test]
    fn test_validation_result_accumulates() {
        let mut result = ValidationResult::new();
        result.check("modules[0].group", validate_group_id("com.example.app"));
        assert!(result.is_valid());

        result.check("modules[1].group", validate_group_id("nope"));
        result.check("defaults.compile_sdk", validate_api_level(7));
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 2);
        assert!(result.to_result().is_err());
    }
}
