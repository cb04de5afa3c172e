//! Configuration defaulting pass
//!
//! After a module's own plugin configuration has run, the configurator
//! walks the tree and fills in the settings nothing declared: namespace,
//! Java compatibility, Kotlin JVM target, compile-SDK. Each setting is
//! attempted independently and yields an [`Outcome`]; a missing capability
//! is an outcome, not an error, and never fails the pass.

use crate::extension::{JavaVersion, PlatformConfigurable};
use crate::model::{Project, ProjectTree};
use modforge_core::config::DefaultsConfig;
use modforge_core::error::Result;
use modforge_core::validation;
use serde::Serialize;
use tracing::debug;

/// Java compatibility applied when a module declares none
pub const DEFAULT_JAVA_VERSION: JavaVersion = JavaVersion::V17;

/// Compile-SDK API level applied when a module declares none
pub const DEFAULT_COMPILE_SDK: u32 = 36;

/// Result of one defaulting attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The default was written
    Applied,
    /// An explicit value was already present and was left untouched
    AlreadySet,
    /// The extension does not carry the setting
    Unsupported,
}

impl Outcome {
    /// Whether this attempt wrote a value
    pub fn applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Outcome::Applied => "applied",
            Outcome::AlreadySet => "already set",
            Outcome::Unsupported => "unsupported",
        };
        f.write_str(label)
    }
}

/// Per-module record of what the defaulting pass did
#[derive(Debug, Clone, Serialize)]
pub struct DefaultsReport {
    /// Module the pass ran over
    pub module: String,
    /// False when the module has no platform extension at all
    pub configurable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_options: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kotlin_options: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_sdk: Option<Outcome>,
}

impl DefaultsReport {
    fn not_applicable(module: &str) -> Self {
        Self {
            module: module.to_string(),
            configurable: false,
            namespace: None,
            compile_options: None,
            kotlin_options: None,
            compile_sdk: None,
        }
    }

    /// Number of settings the pass wrote
    pub fn applied_count(&self) -> usize {
        self.outcomes().filter(|(_, o)| o.applied()).count()
    }

    /// The recorded outcomes, labeled by setting
    pub fn outcomes(&self) -> impl Iterator<Item = (&'static str, Outcome)> + '_ {
        [
            ("namespace", self.namespace),
            ("compile options", self.compile_options),
            ("kotlin options", self.kotlin_options),
            ("compile sdk", self.compile_sdk),
        ]
        .into_iter()
        .filter_map(|(label, outcome)| outcome.map(|o| (label, o)))
    }
}

/// Applies idempotent defaults to every module of a tree
///
/// Existing explicit values are never overwritten, and a module without a
/// platform extension is left untouched.
#[derive(Debug, Clone, Copy)]
pub struct ProjectConfigurator {
    java_version: JavaVersion,
    compile_sdk: u32,
}

impl Default for ProjectConfigurator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectConfigurator {
    /// Configurator with the built-in defaults (Java 17, SDK 36)
    pub fn new() -> Self {
        Self {
            java_version: DEFAULT_JAVA_VERSION,
            compile_sdk: DEFAULT_COMPILE_SDK,
        }
    }

    /// Configurator using the `[defaults]` section of the tool configuration
    pub fn from_config(defaults: &DefaultsConfig) -> Result<Self> {
        validation::validate_api_level(defaults.compile_sdk)?;
        Ok(Self {
            java_version: defaults.java_version.parse()?,
            compile_sdk: defaults.compile_sdk,
        })
    }

    /// The Java compatibility this configurator applies
    pub fn java_version(&self) -> JavaVersion {
        self.java_version
    }

    /// The compile-SDK API level this configurator applies
    pub fn compile_sdk(&self) -> u32 {
        self.compile_sdk
    }

    /// Apply defaults to a single module
    ///
    /// Mutates the module's extension in place and reports what happened
    /// per setting. A module without an extension is reported as not
    /// configurable; nothing is created for it.
    pub fn apply_defaults(&self, project: &mut Project) -> DefaultsReport {
        let name = project.name().to_string();
        let group = project.group().to_string();

        let Some(ext) = project.platform_mut() else {
            debug!(module = %name, "no platform extension, skipping");
            return DefaultsReport::not_applicable(&name);
        };

        let report = DefaultsReport {
            configurable: true,
            namespace: Some(self.default_namespace(ext, &group)),
            compile_options: Some(self.default_compile_options(ext)),
            kotlin_options: Some(self.default_kotlin_options(ext)),
            compile_sdk: Some(self.default_compile_sdk(ext)),
            module: name,
        };

        for (setting, outcome) in report.outcomes() {
            debug!(module = %report.module, setting, ?outcome, "defaulting attempted");
        }

        report
    }

    /// Apply defaults to every subproject of a tree
    pub fn configure_tree(&self, tree: &mut ProjectTree) -> Vec<DefaultsReport> {
        tree.subprojects_mut()
            .iter_mut()
            .map(|project| self.apply_defaults(project))
            .collect()
    }

    fn default_namespace(&self, ext: &mut dyn PlatformConfigurable, group: &str) -> Outcome {
        if ext.namespace().is_some() {
            return Outcome::AlreadySet;
        }
        if ext.set_namespace(group.to_string()) {
            Outcome::Applied
        } else {
            Outcome::Unsupported
        }
    }

    fn default_compile_options(&self, ext: &mut dyn PlatformConfigurable) -> Outcome {
        let Some(options) = ext.compile_options_mut() else {
            return Outcome::Unsupported;
        };
        if options.source_compatibility.is_some() && options.target_compatibility.is_some() {
            return Outcome::AlreadySet;
        }
        options.source_compatibility.get_or_insert(self.java_version);
        options.target_compatibility.get_or_insert(self.java_version);
        Outcome::Applied
    }

    fn default_kotlin_options(&self, ext: &mut dyn PlatformConfigurable) -> Outcome {
        let Some(options) = ext.kotlin_options_mut() else {
            return Outcome::Unsupported;
        };
        if options.jvm_target.is_some() {
            return Outcome::AlreadySet;
        }
        options.jvm_target = Some(self.java_version);
        Outcome::Applied
    }

    fn default_compile_sdk(&self, ext: &mut dyn PlatformConfigurable) -> Outcome {
        if ext.compile_sdk().is_some() {
            return Outcome::AlreadySet;
        }
        if ext.set_compile_sdk(self.compile_sdk) {
            Outcome::Applied
        } else {
            Outcome::Unsupported
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::{AndroidExtension, CompileOptions, ExtensionSnapshot};

    fn android_project(group: &str, ext: AndroidExtension) -> Project {
        Project::new("app", group, "android/app")
            .unwrap()
            .with_extension(Box::new(ext))
    }

    #[test]
    fn test_no_extension_is_a_noop() {
        let mut project = Project::new("shared", "com.example.shared", "android/shared").unwrap();
        let report = ProjectConfigurator::new().apply_defaults(&mut project);

        assert!(!report.configurable);
        assert_eq!(report.applied_count(), 0);
        assert!(!project.has_platform());
    }

    #[test]
    fn test_unset_namespace_defaults_to_group() {
        let mut project = android_project("com.example.app", AndroidExtension::new());
        let report = ProjectConfigurator::new().apply_defaults(&mut project);

        assert_eq!(report.namespace, Some(Outcome::Applied));
        assert_eq!(
            project.platform().unwrap().namespace(),
            Some("com.example.app")
        );
    }

    #[test]
    fn test_existing_namespace_is_preserved() {
        let mut project = android_project(
            "com.example.app",
            AndroidExtension::new().with_namespace("com.custom.ns"),
        );
        let report = ProjectConfigurator::new().apply_defaults(&mut project);

        assert_eq!(report.namespace, Some(Outcome::AlreadySet));
        assert_eq!(project.platform().unwrap().namespace(), Some("com.custom.ns"));
    }

    #[test]
    fn test_compile_settings_default() {
        let mut project = android_project("com.example.app", AndroidExtension::new());
        ProjectConfigurator::new().apply_defaults(&mut project);

        let snap = ExtensionSnapshot::of(project.platform().unwrap());
        assert_eq!(snap.source_compatibility, Some(JavaVersion::V17));
        assert_eq!(snap.target_compatibility, Some(JavaVersion::V17));
        assert_eq!(snap.kotlin_jvm_target, Some(JavaVersion::V17));
        assert_eq!(snap.compile_sdk, Some(36));
    }

    #[test]
    fn test_explicit_compile_sdk_is_preserved() {
        let mut project = android_project(
            "com.example.app",
            AndroidExtension::new().with_compile_sdk(34),
        );
        let report = ProjectConfigurator::new().apply_defaults(&mut project);

        assert_eq!(report.compile_sdk, Some(Outcome::AlreadySet));
        assert_eq!(project.platform().unwrap().compile_sdk(), Some(34));
    }

    #[test]
    fn test_partial_compile_options_are_completed() {
        let mut ext = AndroidExtension::new();
        ext.compile_options_mut().unwrap().source_compatibility = Some(JavaVersion::V11);
        let mut project = android_project("com.example.app", ext);

        let report = ProjectConfigurator::new().apply_defaults(&mut project);
        assert_eq!(report.compile_options, Some(Outcome::Applied));

        let options = project.platform().unwrap().compile_options().unwrap();
        assert_eq!(
            *options,
            CompileOptions {
                source_compatibility: Some(JavaVersion::V11),
                target_compatibility: Some(JavaVersion::V17),
            }
        );
    }

    #[test]
    fn test_idempotence() {
        let mut project = android_project("com.example.app", AndroidExtension::new());
        let configurator = ProjectConfigurator::new();

        configurator.apply_defaults(&mut project);
        let first = ExtensionSnapshot::of(project.platform().unwrap());

        let second_report = configurator.apply_defaults(&mut project);
        let second = ExtensionSnapshot::of(project.platform().unwrap());

        assert_eq!(first, second);
        assert_eq!(second_report.applied_count(), 0);
        assert!(second_report
            .outcomes()
            .all(|(_, o)| o == Outcome::AlreadySet));
    }

    /// Extension shaped like an old plugin that only understands namespaces
    #[derive(Debug, Default)]
    struct LegacyExtension {
        namespace: Option<String>,
    }

    impl PlatformConfigurable for LegacyExtension {
        fn namespace(&self) -> Option<&str> {
            self.namespace.as_deref()
        }

        fn set_namespace(&mut self, namespace: String) -> bool {
            self.namespace = Some(namespace);
            true
        }
    }

    #[test]
    fn test_unsupported_settings_are_skipped() {
        let mut project = Project::new("plugin", "io.legacy.plugin", "android/plugin")
            .unwrap()
            .with_extension(Box::new(LegacyExtension::default()));

        let report = ProjectConfigurator::new().apply_defaults(&mut project);

        assert!(report.configurable);
        assert_eq!(report.namespace, Some(Outcome::Applied));
        assert_eq!(report.compile_options, Some(Outcome::Unsupported));
        assert_eq!(report.kotlin_options, Some(Outcome::Unsupported));
        assert_eq!(report.compile_sdk, Some(Outcome::Unsupported));
        assert_eq!(project.platform().unwrap().namespace(), Some("io.legacy.plugin"));
    }

    #[test]
    fn test_configure_tree_touches_every_module() {
        let mut tree = ProjectTree::new("android", ".");
        tree.add_subproject(android_project("com.example.app", AndroidExtension::new()))
            .unwrap();
        tree.add_subproject(
            Project::new("shared", "com.example.shared", "./shared").unwrap(),
        )
        .unwrap();

        let reports = ProjectConfigurator::new().configure_tree(&mut tree);
        assert_eq!(reports.len(), 2);
        assert!(reports[0].configurable);
        assert!(!reports[1].configurable);
    }

    #[test]
    fn test_from_config_overrides() {
        let defaults = DefaultsConfig {
            java_version: "21".to_string(),
            compile_sdk: 34,
        };
        let configurator = ProjectConfigurator::from_config(&defaults).unwrap();
        assert_eq!(configurator.java_version(), JavaVersion::V21);
        assert_eq!(configurator.compile_sdk(), 34);

        let bad = DefaultsConfig {
            java_version: "9".to_string(),
            compile_sdk: 34,
        };
        assert!(ProjectConfigurator::from_config(&bad).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_extension() -> impl Strategy<Value = AndroidExtension> {
            (
                proptest::option::of(Just("com.preset.ns".to_string())),
                proptest::option::of(21u32..=40),
                proptest::option::of(Just(JavaVersion::V11)),
            )
                .prop_map(|(ns, sdk, java)| {
                    let mut ext = AndroidExtension::new();
                    if let Some(ns) = ns {
                        ext.set_namespace(ns);
                    }
                    if let Some(sdk) = sdk {
                        ext.set_compile_sdk(sdk);
                    }
                    if let Some(java) = java {
                        ext = ext.with_compatibility(java);
                    }
                    ext
                })
        }

        proptest! {
            #[test]
            fn apply_defaults_is_idempotent(ext in arb_extension()) {
                let mut project = android_project("com.example.app", ext);
                let configurator = ProjectConfigurator::new();

                configurator.apply_defaults(&mut project);
                let once = ExtensionSnapshot::of(project.platform().unwrap());

                configurator.apply_defaults(&mut project);
                let twice = ExtensionSnapshot::of(project.platform().unwrap());

                prop_assert_eq!(once, twice);
            }

            #[test]
            fn presets_are_never_overwritten(ext in arb_extension()) {
                let before = {
                    let mut project = android_project("com.example.app", ext.clone());
                    let snap = ExtensionSnapshot::of(project.platform().unwrap());
                    ProjectConfigurator::new().apply_defaults(&mut project);
                    (snap, ExtensionSnapshot::of(project.platform().unwrap()))
                };
                let (pre, post) = before;

                if let Some(ns) = pre.namespace {
                    prop_assert_eq!(post.namespace, Some(ns));
                }
                if let Some(sdk) = pre.compile_sdk {
                    prop_assert_eq!(post.compile_sdk, Some(sdk));
                }
                if let Some(java) = pre.source_compatibility {
                    prop_assert_eq!(post.source_compatibility, Some(java));
                }
            }
        }
    }
}
