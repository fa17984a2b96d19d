//! Configuration file support for rmake.
//!
//! rmake reads two configuration file locations:
//! - Global: `~/.rmake/config.toml` - User-wide defaults
//! - Project: `.rmake/config.toml` in the source directory
//!
//! Project config takes precedence over global config. Command-line flags and
//! environment variables take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// rmake configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,

    /// Tool and install locations
    pub paths: PathsConfig,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Default build directory (used when `--build_dir` is not given)
    pub build_dir: Option<PathBuf>,

    /// Parallel jobs for the build tool (None = processor count)
    pub jobs: Option<usize>,

    /// Extra CMake defines, placed before any `--cmake_darg` values
    pub cmake_args: Vec<String>,
}

/// Location fallbacks used when the matching environment variable is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PathsConfig {
    /// ROCm install root
    pub rocm: Option<String>,

    /// C++ compiler launcher (e.g. ccache)
    pub compiler_launcher: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration, or defaults if the file doesn't exist.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.build_dir.is_some() {
            self.build.build_dir = other.build.build_dir;
        }
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
        if !other.build.cmake_args.is_empty() {
            self.build.cmake_args = other.build.cmake_args;
        }

        if other.paths.rocm.is_some() {
            self.paths.rocm = other.paths.rocm;
        }
        if other.paths.compiler_launcher.is_some() {
            self.paths.compiler_launcher = other.paths.compiler_launcher;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.rmake/config.toml)
/// 2. Global config (~/.rmake/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Result<Config> {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path)?);
    }

    config.merge(Config::load_or_default(project_path)?);

    Ok(config)
}

/// Get the global rmake config directory (~/.rmake).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".rmake"))
}

/// Get the global config path (~/.rmake/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.rmake/config.toml).
pub fn project_config_path(source_dir: &Path) -> PathBuf {
    source_dir.join(".rmake").join("config.toml")
}
