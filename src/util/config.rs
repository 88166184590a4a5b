//! Configuration file support for chils-build.
//!
//! Two configuration file locations are read:
//! - Global: `~/.chils-build/config.toml` - User-wide defaults
//! - Project: `.chils-build/config.toml` - Per-checkout overrides
//!
//! Project config takes precedence over global config. Command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::artifact::{DEFAULT_LIBRARY_NAME, DEFAULT_PACKAGE_NAME, DEFAULT_SOURCE_ROOT};

/// Name of the per-project and per-user configuration directory.
pub const CONFIG_DIR_NAME: &str = ".chils-build";

/// Default build output root, relative to the working directory.
pub const DEFAULT_OUT_DIR: &str = "build/lib";

/// chils-build configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compiler selection
    pub toolchain: ToolchainSettings,

    /// Native build settings
    pub build: BuildConfig,

    /// Package layout
    pub package: PackageConfig,
}

/// Toolchain overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// C compiler passed as `CC=` to the native build (e.g., /usr/bin/clang)
    pub cc: Option<PathBuf>,

    /// Homebrew gcc installation prefix, used on macOS instead of
    /// `brew --prefix gcc`
    pub gcc_prefix: Option<PathBuf>,
}

/// Native build settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build tool to run (defaults to `make`)
    pub make: Option<PathBuf>,

    /// Parallel jobs passed as `-j` (None = let the build tool decide)
    pub jobs: Option<usize>,

    /// Build output root, relative to the working directory
    pub out_dir: Option<PathBuf>,
}

/// Package layout settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Package subdirectory the library is staged into
    pub name: Option<String>,

    /// Library base name (`CHILS` builds `libCHILS.so`)
    pub library: Option<String>,

    /// Directory holding the package sources, relative to the working directory
    pub source_root: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Toolchain settings
        if other.toolchain.cc.is_some() {
            self.toolchain.cc = other.toolchain.cc;
        }
        if other.toolchain.gcc_prefix.is_some() {
            self.toolchain.gcc_prefix = other.toolchain.gcc_prefix;
        }

        // Build settings
        if other.build.make.is_some() {
            self.build.make = other.build.make;
        }
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
        if other.build.out_dir.is_some() {
            self.build.out_dir = other.build.out_dir;
        }

        // Package settings
        if other.package.name.is_some() {
            self.package.name = other.package.name;
        }
        if other.package.library.is_some() {
            self.package.library = other.package.library;
        }
        if other.package.source_root.is_some() {
            self.package.source_root = other.package.source_root;
        }
    }

    /// Package subdirectory name, falling back to `chils`.
    pub fn package_name(&self) -> &str {
        self.package.name.as_deref().unwrap_or(DEFAULT_PACKAGE_NAME)
    }

    /// Library base name, falling back to `CHILS`.
    pub fn library_name(&self) -> &str {
        self.package.library.as_deref().unwrap_or(DEFAULT_LIBRARY_NAME)
    }

    /// Package source root, falling back to `python`.
    pub fn source_root(&self) -> PathBuf {
        self.package
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_ROOT))
    }

    /// Build output root, falling back to `build/lib`.
    pub fn out_dir(&self) -> PathBuf {
        self.build
            .out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR))
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.chils-build/config.toml)
/// 2. Global config (~/.chils-build/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global) = global_path {
        if global.exists() {
            config.merge(Config::load_or_default(global));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global config directory (~/.chils-build).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// Get the global config path (~/.chils-build/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.chils-build/config.toml).
pub fn project_config_path(work_dir: &Path) -> PathBuf {
    work_dir.join(CONFIG_DIR_NAME).join("config.toml")
}
