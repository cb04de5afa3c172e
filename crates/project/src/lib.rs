//! Project-tree model and configuration defaulting for Android module trees
//!
//! This crate provides the in-memory model behind the Modforge tools:
//! - A project tree (root plus subprojects) with per-module build settings
//! - The platform-extension capability interface and the Android extension
//! - The configuration defaulting pass (namespace, Java/Kotlin levels,
//!   compile-SDK)
//! - Build-output layout redirection and clean
//! - Dependency-repository declarations

#![warn(missing_docs)]

pub mod configure;
pub mod extension;
pub mod layout;
pub mod model;
pub mod repositories;

pub use configure::{DefaultsReport, Outcome, ProjectConfigurator};
pub use extension::{AndroidExtension, JavaVersion, PlatformConfigurable};
pub use model::{Project, ProjectTree};
pub use repositories::Repository;
