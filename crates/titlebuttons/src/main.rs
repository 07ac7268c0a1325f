//! titlebuttons - Restyle GTK title-bar buttons from a TOML config
//!
//! Generates `~/.config/gtk-4.0/gtk.css` and `~/.config/gtk-3.0/gtk.css`
//! from the user's configuration and optionally keeps them in sync with it.

mod services;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};

use titlebuttons_core::config::{ConfigLoadResult, DEFAULT_CONFIG_TOML};
use titlebuttons_core::{Config, Dialect, generate, logging};

use crate::services::config_watcher::ConfigWatcher;
use crate::services::file_sync::FileSync;
use crate::services::root_apply;

/// titlebuttons - Restyle GTK title-bar buttons from a TOML config
#[derive(Parser, Debug)]
#[command(name = "titlebuttons", version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (uses XDG lookup if not specified)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate both stylesheets and write them (default)
    Generate,
    /// Print one generated stylesheet to stdout
    Print {
        /// Toolkit to generate for
        #[arg(short, long, value_enum, default_value = "gtk4")]
        dialect: DialectArg,
    },
    /// Validate configuration and exit (returns non-zero on errors)
    Check,
    /// Generate, then regenerate whenever the config file changes
    ///
    /// Without a config file there is nothing to follow: the defaults are
    /// written once and the command exits.
    Watch,
    /// Print the default configuration with comments
    PrintDefaultConfig,
    /// Copy the generated stylesheets to the root user (asks for a password)
    ApplyToRoot {
        /// Helper script run through pkexec
        #[arg(long, default_value = root_apply::DEFAULT_SCRIPT)]
        script: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DialectArg {
    Gtk4,
    Gtk3,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Gtk4 => Dialect::Gtk4,
            DialectArg::Gtk3 => Dialect::Gtk3,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    logging::init(args.verbose);

    match args.command.unwrap_or(Command::Generate) {
        // These don't need a config
        Command::PrintDefaultConfig => {
            print!("{}", DEFAULT_CONFIG_TOML);
            ExitCode::SUCCESS
        }
        Command::ApplyToRoot { script } => handle_apply_to_root(&script),

        command => {
            let Some(load_result) = load_config(args.config.as_deref()) else {
                return ExitCode::FAILURE;
            };

            match command {
                Command::Check => handle_check(&load_result),
                Command::Print { dialect } => {
                    warn_if_invalid(&load_result.config);
                    let sheets = generate(&load_result.config);
                    print!("{}", sheets.get(dialect.into()).as_str());
                    ExitCode::SUCCESS
                }
                Command::Watch => handle_watch(load_result),
                _ => handle_generate(&load_result.config),
            }
        }
    }
}

/// Load configuration using the XDG lookup chain.
///
/// If `--config` is specified, it must exist (no fallback).
fn load_config(explicit: Option<&Path>) -> Option<ConfigLoadResult> {
    let load_result = match Config::find_and_load(explicit) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return None;
        }
    };

    if let Some(ref source) = load_result.source {
        info!("Loaded configuration from {:?}", source);
    } else if load_result.used_defaults {
        warn!("Using default configuration (no config file found)");
    }

    Some(load_result)
}

/// Out-of-range values are reported but never block generation.
fn warn_if_invalid(config: &Config) {
    match config.validate() {
        Ok(()) => debug!("Configuration validated successfully"),
        Err(e) => warn!("{}", e),
    }
}

fn handle_check(load_result: &ConfigLoadResult) -> ExitCode {
    if let Err(e) = load_result.config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    if let Some(ref source) = load_result.source {
        println!("Configuration valid: {}", source.display());
    } else {
        println!("Configuration valid (using defaults)");
    }
    println!("\n{}", load_result.config.summary());
    ExitCode::SUCCESS
}

fn file_sync() -> Option<FileSync> {
    let sync = FileSync::from_env();
    if sync.is_none() {
        eprintln!("Error: HOME is not set");
    }
    sync
}

fn handle_generate(config: &Config) -> ExitCode {
    warn_if_invalid(config);

    let Some(sync) = file_sync() else {
        return ExitCode::FAILURE;
    };

    let report = sync.sync_all(&generate(config));
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(()) => println!("{}: {}", outcome.dialect.name(), outcome.path.display()),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    if report.all_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn handle_watch(load_result: ConfigLoadResult) -> ExitCode {
    let Some(sync) = file_sync() else {
        return ExitCode::FAILURE;
    };

    let Some(path) = load_result.source else {
        // Nothing to follow: write the defaults once
        warn!("No config file to watch (using defaults)");
        return handle_generate(&load_result.config);
    };

    let watcher = ConfigWatcher::new(path, sync);
    match watcher.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn handle_apply_to_root(script: &Path) -> ExitCode {
    let Some(sync) = file_sync() else {
        return ExitCode::FAILURE;
    };

    match root_apply::apply(script, sync.home()) {
        Ok(()) => {
            println!("Stylesheets and configuration applied to the root user");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
