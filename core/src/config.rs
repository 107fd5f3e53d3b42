use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::{ensure, Context as _};
use serde::{Deserialize, Serialize};

use crate::assets;
use crate::sandbox::Sandbox;

pub const APP_NAME: &str = "pycoach";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    pub sandbox: SandboxConfig,
    pub catalog: CatalogConfig,
    pub progress: ProgressConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub python: PathBuf,
    pub timeout_secs: f64,
    pub stdout_capture_max_bytes: usize,
    pub stderr_capture_max_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// `None` means the built-in problem library.
    pub problems_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// `None` means `<data dir>/pycoach/progress.json`.
    pub save_file: Option<PathBuf>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            python: Sandbox::DEFAULT_PYTHON.into(),
            timeout_secs: Sandbox::DEFAULT_TIMEOUT.as_secs_f64(),
            stdout_capture_max_bytes: Sandbox::DEFAULT_CAPTURE_MAX_BYTES,
            stderr_capture_max_bytes: Sandbox::DEFAULT_CAPTURE_MAX_BYTES,
        }
    }
}

impl SandboxConfig {
    pub fn timeout(&self) -> anyhow::Result<Duration> {
        self::parse_timeout_secs(self.timeout_secs).context("Invalid `sandbox.timeout_secs`")
    }
}

/// Accepts a finite, positive number of seconds.
pub fn parse_timeout_secs(secs: f64) -> anyhow::Result<Duration> {
    ensure!(
        secs.is_finite() && secs > 0.0,
        "timeout must be a positive number of seconds, got {}",
        secs
    );
    Duration::try_from_secs_f64(secs)
        .with_context(|| format!("timeout of {} seconds is too large", secs))
}

impl Config {
    pub const FILENAME: &str = "pycoach.toml";

    pub fn example_toml() -> String {
        assets::text(assets::EXAMPLE_CONFIG_FILENAME).into_owned()
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.sandbox.timeout()?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Find config file ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> Option<PathBuf> {
        cur_dir
            .as_ref()
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
    }

    /// Loads the nearest `pycoach.toml`, or the defaults when there is none.
    pub fn from_file_in_ancestors_or_default(cur_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        match Self::find_file_in_ancestors(cur_dir) {
            Some(path) => {
                log::debug!("Using config {:?}", path);
                Self::from_toml_file(path)
            }
            None => {
                log::debug!("No {} found; using defaults", Self::FILENAME);
                Ok(Self::default())
            }
        }
    }

    /// Resolves `path` against the directory of the config file it came from.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_owned();
        }
        match self.source_config_file.as_ref().and_then(|f| f.parent()) {
            Some(dir) => dir.join(path),
            None => path.to_owned(),
        }
    }

    pub fn problems_file(&self) -> Option<PathBuf> {
        self.catalog
            .problems_file
            .as_ref()
            .map(|p| self.resolve_path(p))
    }

    pub fn progress_file(&self) -> PathBuf {
        match &self.progress.save_file {
            Some(p) => self.resolve_path(p),
            None => Self::default_progress_file(),
        }
    }

    fn default_progress_file() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join("progress.json")
    }
}
