//! Project-tree model
//!
//! A [`ProjectTree`] is the in-memory picture of a multi-module build: a
//! root project plus its subprojects. Each subproject may carry a platform
//! extension; the tree itself never creates one, it only holds what the
//! module's plugin declared.

use crate::extension::{AndroidExtension, ExtensionSnapshot, PlatformConfigurable};
use crate::repositories::Repository;
use modforge_core::config::{ConfigSchema, PluginKind};
use modforge_core::error::{Error, Result};
use modforge_core::validation;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// An independently buildable module within the tree
#[derive(Debug)]
pub struct Project {
    name: String,
    group: String,
    project_dir: PathBuf,
    build_dir: PathBuf,
    extension: Option<Box<dyn PlatformConfigurable>>,
}

impl Project {
    /// Create a project rooted at `dir`, with its build output defaulting to
    /// `<dir>/build`
    pub fn new(name: impl Into<String>, group: impl Into<String>, dir: impl Into<PathBuf>) -> Result<Self> {
        let name = name.into();
        let group = group.into();
        if name.is_empty() {
            return Err(Error::project("Project name must not be empty"));
        }
        validation::validate_group_id(&group)?;

        let project_dir = dir.into();
        let build_dir = project_dir.join("build");
        Ok(Self {
            name,
            group,
            project_dir,
            build_dir,
            extension: None,
        })
    }

    /// Attach the platform extension the module's plugin provides
    pub fn with_extension(mut self, extension: Box<dyn PlatformConfigurable>) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Module name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Group identifier
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Directory the module lives in
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Current build-output directory
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Redirect the build-output directory
    pub fn set_build_dir(&mut self, dir: impl Into<PathBuf>) {
        self.build_dir = dir.into();
    }

    /// Whether the module carries a platform extension
    pub fn has_platform(&self) -> bool {
        self.extension.is_some()
    }

    /// The platform extension, if the module's plugin provides one
    pub fn platform(&self) -> Option<&dyn PlatformConfigurable> {
        self.extension.as_deref()
    }

    /// Mutable access to the platform extension
    pub fn platform_mut(&mut self) -> Option<&mut dyn PlatformConfigurable> {
        match self.extension.as_mut() {
            Some(ext) => Some(ext.as_mut()),
            None => None,
        }
    }

    /// Serializable view of the module
    pub fn view(&self) -> ModuleView {
        ModuleView {
            name: self.name.clone(),
            group: self.group.clone(),
            build_dir: self.build_dir.clone(),
            platform: self.platform().map(ExtensionSnapshot::of),
        }
    }
}

/// A root project and its subprojects
#[derive(Debug)]
pub struct ProjectTree {
    name: String,
    root_dir: PathBuf,
    build_dir: PathBuf,
    repositories: Vec<Repository>,
    subprojects: Vec<Project>,
}

impl ProjectTree {
    /// Create an empty tree rooted at `root_dir`
    pub fn new(name: impl Into<String>, root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        let build_dir = root_dir.join("build");
        Self {
            name: name.into(),
            root_dir,
            build_dir,
            repositories: Repository::defaults(),
            subprojects: Vec::new(),
        }
    }

    /// Build a tree from the tool configuration
    ///
    /// Modules applying the Android plugin get an [`AndroidExtension`]
    /// seeded with whatever the module declared explicitly; other modules
    /// get no extension.
    pub fn from_config(schema: &ConfigSchema) -> Result<Self> {
        let mut tree = Self::new(&schema.general.project_name, &schema.general.root_dir);
        tree.repositories = Repository::from_config(&schema.repositories);

        for module in &schema.modules {
            let dir = tree.root_dir.join(&module.name);
            let mut project = Project::new(&module.name, &module.group, dir)?;

            if module.plugin == PluginKind::Android {
                let mut ext = AndroidExtension::new();
                if let Some(ns) = &module.namespace {
                    ext = ext.with_namespace(ns);
                }
                if let Some(sdk) = module.compile_sdk {
                    ext = ext.with_compile_sdk(sdk);
                }
                project = project.with_extension(Box::new(ext));
            }

            tree.add_subproject(project)?;
        }

        Ok(tree)
    }

    /// Root project name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root project directory
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Root build-output directory
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Redirect the root build-output directory
    pub fn set_build_dir(&mut self, dir: impl Into<PathBuf>) {
        self.build_dir = dir.into();
    }

    /// Repositories every module resolves dependencies against
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    /// Replace the repository list
    pub fn set_repositories(&mut self, repositories: Vec<Repository>) {
        self.repositories = repositories;
    }

    /// Add a subproject; names must be unique within the tree
    pub fn add_subproject(&mut self, project: Project) -> Result<()> {
        if self.get(project.name()).is_some() {
            return Err(Error::duplicate_module(project.name()));
        }
        self.subprojects.push(project);
        Ok(())
    }

    /// All subprojects
    pub fn subprojects(&self) -> &[Project] {
        &self.subprojects
    }

    /// All subprojects, mutably
    pub fn subprojects_mut(&mut self) -> &mut [Project] {
        &mut self.subprojects
    }

    /// Look up a subproject by name
    pub fn get(&self, name: &str) -> Option<&Project> {
        self.subprojects.iter().find(|p| p.name() == name)
    }

    /// Serializable view of the whole tree
    pub fn view(&self) -> TreeView {
        TreeView {
            name: self.name.clone(),
            build_dir: self.build_dir.clone(),
            repositories: self.repositories.iter().map(ToString::to_string).collect(),
            modules: self.subprojects.iter().map(Project::view).collect(),
        }
    }
}

/// Serializable view of a module
#[derive(Debug, Clone, Serialize)]
pub struct ModuleView {
    pub name: String,
    pub group: String,
    pub build_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<ExtensionSnapshot>,
}

/// Serializable view of a tree
#[derive(Debug, Clone, Serialize)]
pub struct TreeView {
    pub name: String,
    pub build_dir: PathBuf,
    pub repositories: Vec<String>,
    pub modules: Vec<ModuleView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_new_validates_group() {
        assert!(Project::new("app", "com.example.app", "android/app").is_ok());
        assert!(Project::new("app", "not a group", "android/app").is_err());
        assert!(Project::new("", "com.example.app", "android/app").is_err());
    }

    #[test]
    fn test_project_default_build_dir() {
        let project = Project::new("app", "com.example.app", "android/app").unwrap();
        assert_eq!(project.build_dir(), Path::new("android/app/build"));
    }

    #[test]
    fn test_tree_rejects_duplicate_names() {
        let mut tree = ProjectTree::new("android", ".");
        tree.add_subproject(Project::new("app", "com.example.app", "./app").unwrap())
            .unwrap();
        let err = tree
            .add_subproject(Project::new("app", "com.example.other", "./app").unwrap())
            .unwrap_err();
        assert_eq!(err.code, modforge_core::ErrorCode::DuplicateModule);
    }

    #[test]
    fn test_from_config_attaches_extensions_by_plugin() {
        let toml = r#"
            [[modules]]
            name = "app"
            group = "com.example.app"

            [[modules]]
            name = "shared"
            group = "com.example.shared"
            plugin = "jvm"
        "#;
        let schema: ConfigSchema = toml::from_str(toml).unwrap();
        let tree = ProjectTree::from_config(&schema).unwrap();

        assert!(tree.get("app").unwrap().has_platform());
        assert!(!tree.get("shared").unwrap().has_platform());
    }

    #[test]
    fn test_from_config_seeds_declared_settings() {
        let toml = r#"
            [[modules]]
            name = "app"
            group = "com.example.app"
            namespace = "com.custom.ns"
            compile_sdk = 34
        "#;
        let schema: ConfigSchema = toml::from_str(toml).unwrap();
        let tree = ProjectTree::from_config(&schema).unwrap();

        let platform = tree.get("app").unwrap().platform().unwrap();
        assert_eq!(platform.namespace(), Some("com.custom.ns"));
        assert_eq!(platform.compile_sdk(), Some(34));
    }

    #[test]
    fn test_tree_view_serializes() {
        let mut tree = ProjectTree::new("android", ".");
        tree.add_subproject(
            Project::new("app", "com.example.app", "./app")
                .unwrap()
                .with_extension(Box::new(AndroidExtension::new())),
        )
        .unwrap();

        let json = serde_json::to_string(&tree.view()).unwrap();
        assert!(json.contains("\"app\""));
        assert!(json.contains("google"));
    }
}
