//! Command implementations

pub mod build;
pub mod clean;
pub mod completions;
pub mod toolchain;

use std::path::PathBuf;

use anyhow::{Context, Result};

use chils_build::core::PlatformClass;
use chils_build::GlobalContext;

/// Context rooted at `--work-dir`, or the current directory.
fn context(work_dir: Option<PathBuf>) -> Result<GlobalContext> {
    match work_dir {
        Some(dir) => {
            let dir = dir
                .canonicalize()
                .with_context(|| format!("working directory not found: {}", dir.display()))?;
            Ok(GlobalContext::with_work_dir(dir))
        }
        None => GlobalContext::new(),
    }
}

/// Parse a `--platform` value.
fn parse_platform(platform: Option<&str>) -> Result<Option<PlatformClass>> {
    platform
        .map(|p| p.parse::<PlatformClass>())
        .transpose()
        .map_err(|e| anyhow::anyhow!("{}", e))
}
