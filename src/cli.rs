// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `hostdeploy`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hostdeploy",
    version,
    about = "Bring a local web-server host into the configured deployment state.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Hostdeploy.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Hostdeploy.toml", global = true)]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `HOSTDEPLOY_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Configure a web application on its site.
    Configure {
        /// Only process this `[app.<name>]` entry.
        #[arg(long, value_name = "NAME")]
        app: Option<String>,

        /// Print the planned changes without applying them.
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        extra: ExtraArgs,
    },

    /// Recycle the configured application's pool.
    Recycle {
        /// Only process this `[app.<name>]` entry.
        #[arg(long, value_name = "NAME")]
        app: Option<String>,

        #[command(flatten)]
        extra: ExtraArgs,
    },

    /// Restart the web-server service.
    Restart {
        #[command(flatten)]
        extra: ExtraArgs,
    },

    /// Print a sample configuration file.
    SampleConfig,
}

/// Free-form arguments forwarded with every operation. They are recorded in
/// the debug log and otherwise ignored.
#[derive(Debug, Clone, Default, Args)]
pub struct ExtraArgs {
    #[arg(value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub args: Vec<(String, String)>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parse a `KEY=VALUE` pair.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("invalid argument '{s}' (expected KEY=VALUE)")),
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
