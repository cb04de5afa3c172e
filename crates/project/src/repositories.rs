//! Dependency-repository declarations
//!
//! Pure data: the repositories every module resolves artifacts against.
//! Nothing here performs network I/O.

use modforge_core::config::RepositoriesConfig;
use std::fmt;

/// Google's Maven repository URL
pub const GOOGLE_MAVEN_URL: &str = "https://dl.google.com/dl/android/maven2/";

/// Maven Central URL
pub const MAVEN_CENTRAL_URL: &str = "https://repo.maven.apache.org/maven2/";

/// A dependency repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repository {
    /// Google's Maven repository
    Google,
    /// Maven Central
    MavenCentral,
    /// Any other repository, by URL
    Custom(String),
}

impl Repository {
    /// The standard pair every Android tree declares
    pub fn defaults() -> Vec<Repository> {
        vec![Repository::Google, Repository::MavenCentral]
    }

    /// Build the repository list from the tool configuration
    pub fn from_config(config: &RepositoriesConfig) -> Vec<Repository> {
        let mut repositories = Vec::new();
        if config.google {
            repositories.push(Repository::Google);
        }
        if config.maven_central {
            repositories.push(Repository::MavenCentral);
        }
        repositories.extend(config.custom.iter().cloned().map(Repository::Custom));
        repositories
    }

    /// The repository's resolution URL
    pub fn url(&self) -> &str {
        match self {
            Repository::Google => GOOGLE_MAVEN_URL,
            Repository::MavenCentral => MAVEN_CENTRAL_URL,
            Repository::Custom(url) => url,
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repository::Google => f.write_str("google"),
            Repository::MavenCentral => f.write_str("mavenCentral"),
            Repository::Custom(url) => f.write_str(url),
        }
    }
}
