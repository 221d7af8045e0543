//! Daemon entry plumbing.
//!
//! Shared front end for the `okvmd` binaries: command line parsing, the
//! file-overrides-block resolution pipeline, and the dump/serve split.

pub mod loader;
pub mod logging;
pub mod scheme;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use okvm_config::{
    apply_override_block, build_raw_from_overrides, deep_merge, make_config_dump,
    resolve_with_plugins, ConfigError, ConfigSection,
};

use crate::plugins::BuiltinRegistry;
use loader::LoaderError;

/// Everything that can go wrong between argv and a resolved config.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Parser)]
#[command(about = "KVM-over-IP daemon configuration front end", version)]
pub struct Args {
    /// Config file path
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        default_value = "/etc/okvmd/main.yaml"
    )]
    pub config_path: PathBuf,

    /// Override config options (like sec/sub/opt=value)
    #[arg(short = 'o', long = "set-options", value_name = "KEY=VALUE", num_args = 1..)]
    pub set_options: Vec<String>,

    /// Print the effective configuration and exit
    #[arg(short = 'm', long = "dump-config")]
    pub dump_config: bool,
}

/// Loads the config file and resolves it for the given top-level sections.
///
/// Overrides from the command line are merged over the file, then the
/// file's own `override` block is applied on top of both.
pub fn init_config(
    path: &Path,
    sections: &[&str],
    overrides: &[String],
) -> Result<ConfigSection, AppError> {
    let mut raw = loader::load_yaml_file(path)?;
    raw = deep_merge(raw, build_raw_from_overrides(overrides)?);
    raw = apply_override_block(raw);
    resolve_with_plugins(
        &raw,
        &scheme::base_scheme(sections),
        &scheme::plugin_slots(sections),
        &BuiltinRegistry,
    )
    .map_err(Into::into)
}

/// Shared binary body. Returns the process exit code.
pub fn run(args: &Args, sections: &[&str]) -> i32 {
    let config = match init_config(&args.config_path, sections, &args.set_options) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return 1;
        }
    };
    if args.dump_config {
        print_dump(&make_config_dump(&config));
        return 0;
    }
    logging::init_logging(&config);
    tracing::info!(config = %args.config_path.display(), "configuration resolved");
    0
}

fn print_dump(dump: &str) {
    let colorize = std::io::stdout().is_terminal();
    for line in dump.lines() {
        if !colorize {
            println!("{line}");
        } else if line.trim_start().starts_with('#') {
            println!("{}", line.bright_black());
        } else if let Some((key, rest)) = line.split_once(':') {
            println!("{}:{rest}", key.cyan());
        } else {
            println!("{line}");
        }
    }
}
