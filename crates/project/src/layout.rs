//! Build-output layout
//!
//! Redirects build output into a single shared tree (the root project's
//! redirected build directory, one subdirectory per module) and deletes
//! that tree on `clean`.

use crate::model::ProjectTree;
use modforge_core::error::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Point the tree's build output at `target`
///
/// The root build directory becomes `target`; each subproject's becomes
/// `target/<module-name>`.
pub fn redirect_build_dirs(tree: &mut ProjectTree, target: &Path) {
    tree.set_build_dir(target);
    for project in tree.subprojects_mut() {
        let dir = target.join(project.name());
        debug!(module = %project.name(), dir = %dir.display(), "redirecting build dir");
        project.set_build_dir(dir);
    }
}

/// What a clean pass removed (or would remove)
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    /// The directory tree that was deleted
    pub path: PathBuf,
    /// False when there was nothing to delete
    pub existed: bool,
    /// Files under the tree
    pub files_removed: usize,
    /// Total size of those files
    pub bytes_reclaimed: u64,
}

impl CleanReport {
    fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            existed: false,
            files_removed: 0,
            bytes_reclaimed: 0,
        }
    }
}

/// Delete the tree's redirected build-output directory
///
/// Deleting a directory that does not exist is a successful no-op.
pub fn clean(tree: &ProjectTree) -> Result<CleanReport> {
    let report = measure(tree.build_dir())?;
    if !report.existed {
        debug!(path = %report.path.display(), "build dir absent, nothing to clean");
        return Ok(report);
    }

    std::fs::remove_dir_all(&report.path).map_err(|e| {
        Error::io(format!("Failed to delete {}: {}", report.path.display(), e)).with_source(e)
    })?;

    info!(
        path = %report.path.display(),
        files = report.files_removed,
        bytes = report.bytes_reclaimed,
        "build dir cleaned"
    );
    Ok(report)
}

/// Report what `clean` would delete, without deleting anything
pub fn clean_dry_run(tree: &ProjectTree) -> Result<CleanReport> {
    measure(tree.build_dir())
}

fn measure(path: &Path) -> Result<CleanReport> {
    if !path.exists() {
        return Ok(CleanReport::empty(path));
    }

    let mut files = 0usize;
    let mut bytes = 0u64;
    for entry in WalkDir::new(path) {
        let entry = entry.map_err(|e| Error::io(format!("Failed to walk {}: {}", path.display(), e)))?;
        if entry.file_type().is_file() {
            files += 1;
            bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
        }
    }

    Ok(CleanReport {
        path: path.to_path_buf(),
        existed: true,
        files_removed: files,
        bytes_reclaimed: bytes,
    })
}
