// src/logging.rs

//! Process-wide `tracing` subscriber for the `hostdeploy` binary.
//!
//! The filter is picked in this order:
//! 1. `--log-level`, applied as a single global level
//! 2. `HOSTDEPLOY_LOG`, read as `EnvFilter` directives, so both `debug` and
//!    `hostdeploy::service=trace,info` work
//! 3. `info`
//!
//! An unparsable `HOSTDEPLOY_LOG` falls through to `info`. Output goes to
//! stderr; stdout carries dry-run plans and sample configs.

use anyhow::{anyhow, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "HOSTDEPLOY_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_directives = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(cli_level, env_directives.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("installing log subscriber: {err}"))
}

pub fn build_filter(cli_level: Option<LogLevel>, env_directives: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::default().add_directive(level_filter(level).into());
    }

    env_directives
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(LevelFilter::INFO.into()))
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}
