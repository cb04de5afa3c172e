//! Modforge Android CLI
//!
//! Applies safe configuration defaults across an Android module tree.

use anyhow::Result;
use clap::{Parser, Subcommand};
use modforge_cli::output::{Status, format_count, format_size, print_error};
use modforge_core::config::Config;
use modforge_core::error::{ErrorCode, exit_codes};
use modforge_core::telemetry::{self, LogConfig};
use modforge_project::configure::ProjectConfigurator;
use modforge_project::layout;
use modforge_project::model::ProjectTree;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "modforge-android")]
#[command(about = "Configuration defaults for Android module trees")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply configuration defaults to every module
    Configure {
        /// Output the per-module report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the module tree and its current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete the redirected build-output directory
    Clean {
        /// Report what would be deleted without deleting it
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    telemetry::init_with_config(LogConfig::from_flags(cli.verbose, cli.quiet))?;

    let config = match Config::load(cli.config.as_deref().and_then(|p| p.to_str())) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e);
            std::process::exit(exit_code_for(&e));
        }
    };

    let exit_code = match cli.command {
        Commands::Configure { json } => run_configure(&config, json, cli.quiet),
        Commands::Show { json } => run_show(&config, json),
        Commands::Clean { dry_run } => run_clean(&config, dry_run),
    };

    std::process::exit(exit_code);
}

/// Build the project tree from configuration and redirect its build output
fn load_tree(config: &Config) -> modforge_core::Result<ProjectTree> {
    let mut tree = ProjectTree::from_config(&config.schema)?;
    let target = config
        .schema
        .layout
        .resolved_build_dir(&PathBuf::from(&config.schema.general.root_dir));
    layout::redirect_build_dirs(&mut tree, &target);
    Ok(tree)
}

fn run_configure(config: &Config, json: bool, quiet: bool) -> i32 {
    let mut tree = match load_tree(config) {
        Ok(tree) => tree,
        Err(e) => {
            print_error(&e);
            return exit_code_for(&e);
        }
    };

    let configurator = match ProjectConfigurator::from_config(&config.schema.defaults) {
        Ok(configurator) => configurator,
        Err(e) => {
            print_error(&e);
            return exit_code_for(&e);
        }
    };

    let reports = configurator.configure_tree(&mut tree);

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                Status::error(&format!("Failed to encode report: {}", e));
                return exit_codes::FAILURE;
            }
        }
        return exit_codes::SUCCESS;
    }

    if !quiet {
        Status::info(&format!(
            "Configuring {} in {}",
            format_count(reports.len(), "module", "modules"),
            tree.name()
        ));
    }

    for report in &reports {
        if !report.configurable {
            Status::info(&format!("{}: no platform extension, skipped", report.module));
            continue;
        }

        Status::success(&format!(
            "{}: {}",
            report.module,
            format_count(report.applied_count(), "default applied", "defaults applied")
        ));
        for (setting, outcome) in report.outcomes() {
            Status::detail(&format!("{}: {}", setting, outcome));
        }
    }

    exit_codes::SUCCESS
}

fn run_show(config: &Config, json: bool) -> i32 {
    let tree = match load_tree(config) {
        Ok(tree) => tree,
        Err(e) => {
            print_error(&e);
            return exit_code_for(&e);
        }
    };

    let view = tree.view();

    if json {
        match serde_json::to_string_pretty(&view) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                Status::error(&format!("Failed to encode tree: {}", e));
                return exit_codes::FAILURE;
            }
        }
        return exit_codes::SUCCESS;
    }

    Status::header(&view.name);
    Status::info(&format!("build dir: {}", view.build_dir.display()));
    Status::info(&format!("repositories: {}", view.repositories.join(", ")));

    for module in &view.modules {
        match &module.platform {
            Some(platform) => {
                Status::success(&format!("{} ({})", module.name, module.group));
                if let Some(ns) = &platform.namespace {
                    Status::detail(&format!("namespace: {}", ns));
                }
                if let Some(sdk) = platform.compile_sdk {
                    Status::detail(&format!("compile sdk: {}", sdk));
                }
            }
            None => {
                Status::info(&format!(
                    "{} ({}): no platform extension",
                    module.name, module.group
                ));
            }
        }
    }

    exit_codes::SUCCESS
}

fn run_clean(config: &Config, dry_run: bool) -> i32 {
    let tree = match load_tree(config) {
        Ok(tree) => tree,
        Err(e) => {
            print_error(&e);
            return exit_code_for(&e);
        }
    };

    let result = if dry_run {
        layout::clean_dry_run(&tree)
    } else {
        layout::clean(&tree)
    };

    match result {
        Ok(report) => {
            if !report.existed {
                Status::info("Build directory already clean");
            } else if dry_run {
                Status::info(&format!(
                    "Would remove {} ({}) from {}",
                    format_count(report.files_removed, "file", "files"),
                    format_size(report.bytes_reclaimed),
                    report.path.display()
                ));
            } else {
                Status::success(&format!(
                    "Removed {} ({})",
                    report.path.display(),
                    format_size(report.bytes_reclaimed)
                ));
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            print_error(&e);
            exit_codes::FAILURE
        }
    }
}

/// Map an error to the CLI exit code table
fn exit_code_for(err: &modforge_core::Error) -> i32 {
    match err.code {
        ErrorCode::ConfigError
        | ErrorCode::ConfigNotFound
        | ErrorCode::ConfigParseError => exit_codes::CONFIG_ERROR,
        ErrorCode::ConfigValidationError
        | ErrorCode::ValidationError
        | ErrorCode::InvalidInput
        | ErrorCode::InvalidFormat
        | ErrorCode::InvalidJavaVersion
        | ErrorCode::InvalidApiLevel => exit_codes::VALIDATION_ERROR,
        _ => exit_codes::FAILURE,
    }
}
