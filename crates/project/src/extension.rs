//! Platform-extension capability model
//!
//! A module that applies a platform plugin carries an extension object with
//! its build settings. Which settings an extension supports varies between
//! plugin versions, so every accessor on [`PlatformConfigurable`] is
//! optional: a getter returns `None` when the extension does not carry the
//! setting, and a setter reports whether the write was accepted. Callers
//! treat a refused write as "not applicable", never as an error.

use modforge_core::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Java language level understood by the platform plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JavaVersion {
    /// Java 8
    #[serde(rename = "8")]
    V8,
    /// Java 11
    #[serde(rename = "11")]
    V11,
    /// Java 17
    #[serde(rename = "17")]
    V17,
    /// Java 21
    #[serde(rename = "21")]
    V21,
}

impl JavaVersion {
    /// Numeric form of the version
    pub fn as_str(&self) -> &'static str {
        match self {
            JavaVersion::V8 => "8",
            JavaVersion::V11 => "11",
            JavaVersion::V17 => "17",
            JavaVersion::V21 => "21",
        }
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JavaVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "8" | "1.8" => Ok(JavaVersion::V8),
            "11" => Ok(JavaVersion::V11),
            "17" => Ok(JavaVersion::V17),
            "21" => Ok(JavaVersion::V21),
            other => Err(Error::invalid_java_version(other)),
        }
    }
}

/// Java compilation settings carried by an extension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Source language level, if declared
    pub source_compatibility: Option<JavaVersion>,
    /// Target bytecode level, if declared
    pub target_compatibility: Option<JavaVersion>,
}

/// Kotlin compilation settings carried by an extension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KotlinOptions {
    /// JVM bytecode target, if declared
    pub jvm_target: Option<JavaVersion>,
}

/// Optional-capability interface over a platform extension
///
/// Default implementations report every setting as absent, so an
/// implementation only overrides the accessors for the settings it carries.
pub trait PlatformConfigurable: fmt::Debug {
    /// Currently declared resource namespace
    fn namespace(&self) -> Option<&str> {
        None
    }

    /// Declare the resource namespace; returns false when unsupported
    fn set_namespace(&mut self, _namespace: String) -> bool {
        false
    }

    /// Currently declared compile-SDK API level
    fn compile_sdk(&self) -> Option<u32> {
        None
    }

    /// Declare the compile-SDK API level; returns false when unsupported
    fn set_compile_sdk(&mut self, _level: u32) -> bool {
        false
    }

    /// Java compilation settings, when the extension carries them
    fn compile_options(&self) -> Option<&CompileOptions> {
        None
    }

    /// Mutable Java compilation settings, when the extension carries them
    fn compile_options_mut(&mut self) -> Option<&mut CompileOptions> {
        None
    }

    /// Kotlin compilation settings, when the extension carries them
    fn kotlin_options(&self) -> Option<&KotlinOptions> {
        None
    }

    /// Mutable Kotlin compilation settings, when the extension carries them
    fn kotlin_options_mut(&mut self) -> Option<&mut KotlinOptions> {
        None
    }
}

/// Serializable view of an extension's current settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_sdk: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_compatibility: Option<JavaVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_compatibility: Option<JavaVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kotlin_jvm_target: Option<JavaVersion>,
}

impl ExtensionSnapshot {
    /// Capture the current settings of an extension
    pub fn of(ext: &dyn PlatformConfigurable) -> Self {
        Self {
            namespace: ext.namespace().map(String::from),
            compile_sdk: ext.compile_sdk(),
            source_compatibility: ext.compile_options().and_then(|o| o.source_compatibility),
            target_compatibility: ext.compile_options().and_then(|o| o.target_compatibility),
            kotlin_jvm_target: ext.kotlin_options().and_then(|o| o.jvm_target),
        }
    }
}

/// Full-capability extension provided by the Android application and
/// library plugins
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AndroidExtension {
    namespace: Option<String>,
    compile_sdk: Option<u32>,
    compile_options: CompileOptions,
    kotlin_options: KotlinOptions,
}

impl AndroidExtension {
    /// Create an extension with nothing declared
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-declare a namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Pre-declare a compile-SDK API level
    pub fn with_compile_sdk(mut self, level: u32) -> Self {
        self.compile_sdk = Some(level);
        self
    }

    /// Pre-declare Java source/target compatibility
    pub fn with_compatibility(mut self, version: JavaVersion) -> Self {
        self.compile_options.source_compatibility = Some(version);
        self.compile_options.target_compatibility = Some(version);
        self
    }
}

impl PlatformConfigurable for AndroidExtension {
    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn set_namespace(&mut self, namespace: String) -> bool {
        self.namespace = Some(namespace);
        true
    }

    fn compile_sdk(&self) -> Option<u32> {
        self.compile_sdk
    }

    fn set_compile_sdk(&mut self, level: u32) -> bool {
        self.compile_sdk = Some(level);
        true
    }

    fn compile_options(&self) -> Option<&CompileOptions> {
        Some(&self.compile_options)
    }

    fn compile_options_mut(&mut self) -> Option<&mut CompileOptions> {
        Some(&mut self.compile_options)
    }

    fn kotlin_options(&self) -> Option<&KotlinOptions> {
        Some(&self.kotlin_options)
    }

    fn kotlin_options_mut(&mut self) -> Option<&mut KotlinOptions> {
        Some(&mut self.kotlin_options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_version_display_parse() {
        assert_eq!(JavaVersion::V17.to_string(), "17");
        assert_eq!("21".parse::<JavaVersion>().unwrap(), JavaVersion::V21);
        assert_eq!("1.8".parse::<JavaVersion>().unwrap(), JavaVersion::V8);
        assert!("9".parse::<JavaVersion>().is_err());
    }

    #[test]
    fn test_android_extension_accepts_all_settings() {
        let mut ext = AndroidExtension::new();
        assert!(ext.namespace().is_none());

        assert!(ext.set_namespace("com.example.app".to_string()));
        assert!(ext.set_compile_sdk(36));
        assert_eq!(ext.namespace(), Some("com.example.app"));
        assert_eq!(ext.compile_sdk(), Some(36));
        assert!(ext.compile_options_mut().is_some());
        assert!(ext.kotlin_options_mut().is_some());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let ext = AndroidExtension::new()
            .with_namespace("com.example.app")
            .with_compatibility(JavaVersion::V17);

        let snap = ExtensionSnapshot::of(&ext);
        assert_eq!(snap.namespace.as_deref(), Some("com.example.app"));
        assert_eq!(snap.source_compatibility, Some(JavaVersion::V17));
        assert_eq!(snap.target_compatibility, Some(JavaVersion::V17));
        assert!(snap.compile_sdk.is_none());
        assert!(snap.kotlin_jvm_target.is_none());
    }

    #[derive(Debug)]
    struct BareExtension;

    impl PlatformConfigurable for BareExtension {}

    #[test]
    fn test_default_trait_methods_report_unsupported() {
        let mut ext = BareExtension;
        assert!(ext.namespace().is_none());
        assert!(!ext.set_namespace("com.example.app".to_string()));
        assert!(!ext.set_compile_sdk(36));
        assert!(ext.compile_options_mut().is_none());
        assert!(ext.kotlin_options_mut().is_none());
    }
}
