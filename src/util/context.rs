//! Global context for chils-build operations.
//!
//! Provides centralized access to the working directory and configuration
//! locations. The working directory is explicit: commands resolve it once and
//! pass it down instead of relying on the process-wide current directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{global_config_path, load_config, project_config_path, Config};

/// Global context for chils-build operations.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Directory holding the native sources and makefile
    work_dir: PathBuf,

    /// User-wide config file, if a home directory is known
    global_config: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a context rooted at the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_work_dir(cwd))
    }

    /// Create a context rooted at an explicit working directory.
    pub fn with_work_dir(work_dir: impl Into<PathBuf>) -> Self {
        GlobalContext {
            work_dir: work_dir.into(),
            global_config: global_config_path(),
        }
    }

    /// Use a specific global config file (or none).
    pub fn with_global_config(mut self, path: Option<PathBuf>) -> Self {
        self.global_config = path;
        self
    }

    /// The working directory.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Path of the project config file.
    pub fn project_config_path(&self) -> PathBuf {
        project_config_path(&self.work_dir)
    }

    /// Load merged global and project configuration.
    pub fn load_config(&self) -> Config {
        load_config(self.global_config.as_deref(), &self.project_config_path())
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_dir.join(path)
        }
    }
}
