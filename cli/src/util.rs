use std::{
    path::{Path, PathBuf},
    process::exit,
    time::Duration,
};

use anyhow::Context as _;
use pycoach_core::config::{self, Config};
use serde::Serialize;

use crate::cmd::GlobalArgs;

pub fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        eprintln!("Failed to get current dir: {}", e);
        exit(1);
    })
}

pub fn replace_homedir_to_tilde(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let Some(home_dir) = ::dirs::home_dir() else {
        return path
    };
    path.strip_prefix(home_dir)
        .map(|path| Path::new("~").join(path))
        .unwrap_or(path)
}

/// `--config` wins; otherwise the nearest `pycoach.toml` above the current dir.
pub fn load_config(global_args: &GlobalArgs) -> anyhow::Result<Config> {
    let cfg = match &global_args.config {
        Some(path) => Config::from_toml_file(path.clone())?,
        None => Config::from_file_in_ancestors_or_default(current_dir())?,
    };
    match &cfg.source_config_file {
        Some(path) => log::info!("Config: {:?}", replace_homedir_to_tilde(path)),
        None => log::info!("Config: built-in defaults"),
    }
    log::debug!(
        "Progress file: {:?}",
        replace_homedir_to_tilde(cfg.progress_file())
    );
    Ok(cfg)
}

/// `--timeout` wins over `sandbox.timeout_secs`.
pub fn timeout(global_args: &GlobalArgs, cfg: &Config) -> anyhow::Result<Duration> {
    match global_args.timeout {
        Some(secs) => config::parse_timeout_secs(secs).context("Invalid --timeout"),
        None => cfg.sandbox.timeout(),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}
