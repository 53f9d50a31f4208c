// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod host;
pub mod launch;
pub mod logging;
pub mod reconcile;
pub mod service;
pub mod types;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::{CliArgs, Command, ExtraArgs};
use crate::config::{config_base_dir, load_and_validate, sample_config, ConfigFile};
use crate::fs::RealFileSystem;
use crate::host::{AdministrationSession, FileAdministrationSession};
use crate::launch::SystemLauncher;
use crate::reconcile::{configure, reconcile_plan};
use crate::service::{recycle_pool, restart, SystemServiceController};

/// High-level entry point used by `main.rs`.
///
/// Loads the config, opens one administration session for the whole
/// invocation where the command needs it, and dispatches to:
/// - `configure` (reconciler + optional launch)
/// - `recycle` (pool recycle, never creates anything)
/// - `restart` (stop + start under a shared deadline)
pub async fn run(args: CliArgs) -> Result<()> {
    if matches!(args.command, Command::SampleConfig) {
        print!("{}", toml::to_string(&sample_config())?);
        return Ok(());
    }

    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;
    let base_dir = config_base_dir(&config_path);

    match args.command {
        Command::Configure {
            app,
            dry_run,
            extra,
        } => {
            log_extra_args("configure", &extra);
            run_configure(&cfg, &base_dir, app.as_deref(), dry_run)
        }
        Command::Recycle { app, extra } => {
            log_extra_args("recycle", &extra);
            run_recycle(&cfg, &base_dir, app.as_deref())
        }
        Command::Restart { extra } => {
            log_extra_args("restart", &extra);
            let mut controller = SystemServiceController::new(cfg.config.service.clone());
            let report = restart(&mut controller, cfg.config.restart_timeout()).await?;
            debug!(?report, "restart finished");
            Ok(())
        }
        Command::SampleConfig => Ok(()),
    }
}

fn run_configure(cfg: &ConfigFile, base_dir: &Path, only: Option<&str>, dry_run: bool) -> Result<()> {
    let apps = cfg.select_apps(only)?;
    let root = cfg.resolved_root(base_dir);
    let fs = RealFileSystem;
    let mut session = FileAdministrationSession::open(cfg.resolved_host_state(base_dir), fs.clone())?;

    for (key, desired) in apps {
        if dry_run {
            let plan = reconcile_plan(desired, session.state(), &root, &fs)?;
            println!("[app.{key}] {plan}");
            continue;
        }

        let application = configure(desired, &mut session, &root, &fs, &SystemLauncher)?;
        info!(config = %key, app = %application.path, pool = %application.application_pool_name, "configured");
    }

    Ok(())
}

fn run_recycle(cfg: &ConfigFile, base_dir: &Path, only: Option<&str>) -> Result<()> {
    let apps = cfg.select_apps(only)?;
    let mut session = FileAdministrationSession::open(cfg.resolved_host_state(base_dir), RealFileSystem)?;

    for (key, desired) in apps {
        let pool = recycle_pool(desired, &mut session)?;
        debug!(config = %key, pool = %pool, "recycle issued");
    }

    Ok(())
}

fn log_extra_args(command: &str, extra: &ExtraArgs) {
    for (key, value) in extra.args.iter() {
        debug!(command, key = %key, value = %value, "ignoring extra argument");
    }
}
