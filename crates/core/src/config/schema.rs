//! Configuration schema definitions
//!
//! The `modforge.toml` layout: tool-wide defaults plus the module list the
//! surrounding build describes.

use crate::validation::{self, ValidationResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub repositories: RepositoriesConfig,

    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

impl ConfigSchema {
    /// Validate every field that has a constrained format
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.check(
            "defaults.java_version",
            validation::validate_java_version(&self.defaults.java_version),
        );
        result.check(
            "defaults.compile_sdk",
            validation::validate_api_level(self.defaults.compile_sdk),
        );

        let mut seen = std::collections::HashSet::new();
        for (i, module) in self.modules.iter().enumerate() {
            let field = |name: &str| format!("modules[{}].{}", i, name);

            if module.name.is_empty() {
                result.add_error(field("name"), "module name must not be empty");
            }
            if !seen.insert(module.name.clone()) {
                result.add_error(field("name"), format!("duplicate module name: {}", module.name));
            }
            result.check(&field("group"), validation::validate_group_id(&module.group));
            if let Some(ns) = &module.namespace {
                result.check(&field("namespace"), validation::validate_namespace(ns));
            }
            if let Some(sdk) = module.compile_sdk {
                result.check(&field("compile_sdk"), validation::validate_api_level(sdk));
            }
        }

        result
    }
}

/// General project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Root project name
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Root project directory
    #[serde(default = "default_root_dir")]
    pub root_dir: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            root_dir: default_root_dir(),
        }
    }
}

fn default_project_name() -> String {
    "android".to_string()
}

fn default_root_dir() -> String {
    ".".to_string()
}

/// Default values the configurator applies to modules that have not set them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Java source/target compatibility (also the Kotlin JVM target)
    #[serde(default = "default_java_version")]
    pub java_version: String,

    /// Compile-SDK API level
    #[serde(default = "default_compile_sdk")]
    pub compile_sdk: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            java_version: default_java_version(),
            compile_sdk: default_compile_sdk(),
        }
    }
}

fn default_java_version() -> String {
    "17".to_string()
}

fn default_compile_sdk() -> u32 {
    36
}

/// Build-output layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Where build output goes, relative to the root project directory
    #[serde(default = "default_build_dir")]
    pub build_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            build_dir: default_build_dir(),
        }
    }
}

fn default_build_dir() -> String {
    "../../build".to_string()
}

impl LayoutConfig {
    /// Resolve the configured build directory against a root directory,
    /// expanding `~` and environment variables first.
    pub fn resolved_build_dir(&self, root_dir: &Path) -> PathBuf {
        let expanded = shellexpand::full(&self.build_dir)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| self.build_dir.clone());
        let expanded = PathBuf::from(expanded);
        if expanded.is_absolute() {
            expanded
        } else {
            root_dir.join(expanded)
        }
    }
}

/// Dependency repositories every module resolves against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoriesConfig {
    /// Include Google's Maven repository
    #[serde(default = "default_true")]
    pub google: bool,

    /// Include Maven Central
    #[serde(default = "default_true")]
    pub maven_central: bool,

    /// Extra repository URLs
    #[serde(default)]
    pub custom: Vec<String>,
}

impl Default for RepositoriesConfig {
    fn default() -> Self {
        Self {
            google: true,
            maven_central: true,
            custom: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Which platform plugin a module applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    /// Android application or library plugin
    #[default]
    Android,
    /// Plain JVM plugin, no platform extension
    Jvm,
    /// No plugin at all
    None,
}

/// One module of the project tree, as declared in `modforge.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Module name, unique within the tree
    pub name: String,

    /// Reverse-DNS group identifier
    pub group: String,

    /// Platform plugin the module applies
    #[serde(default)]
    pub plugin: PluginKind,

    /// Explicit resource namespace, if the module declares one
    #[serde(default)]
    pub namespace: Option<String>,

    /// Explicit compile-SDK API level, if the module declares one
    #[serde(default)]
    pub compile_sdk: Option<u32>,
}
