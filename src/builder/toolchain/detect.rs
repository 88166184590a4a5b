//! Compiler discovery for macOS.
//!
//! Apple's `gcc` is a clang shim, so the native build uses Homebrew's gcc,
//! which installs version-suffixed binaries (`gcc-13`, `gcc-14`, ...) under
//! `$(brew --prefix gcc)/bin`.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

use crate::builder::errors::BuildError;
use crate::util::process::{find_executable, ProcessBuilder};

/// Matches `gcc-13`, `gcc-13.2`, `gcc-13.2.0` but not `gcc-ar-13` or `gcc-nm-13`.
static VERSIONED_GCC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^gcc-(\d+(?:\.\d+){0,2})$").expect("versioned gcc pattern is valid")
});

/// Locate the Homebrew gcc installation prefix.
///
/// An explicitly configured prefix wins; otherwise `brew --prefix gcc` is run.
pub fn gcc_prefix(configured: Option<&Path>) -> Result<PathBuf, BuildError> {
    if let Some(prefix) = configured {
        tracing::debug!("Using configured gcc prefix: {}", prefix.display());
        return Ok(prefix.to_path_buf());
    }

    let brew = find_executable("brew")
        .ok_or_else(|| BuildError::toolchain_not_found("Homebrew (`brew`) is not on PATH"))?;

    let cmd = ProcessBuilder::new(&brew).args(["--prefix", "gcc"]);
    tracing::debug!("Running `{}`", cmd.display_command());

    let output = cmd
        .exec_and_check()
        .map_err(|e| BuildError::toolchain_not_found(format!("{:#}", e)))?;

    let prefix = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if prefix.is_empty() {
        return Err(BuildError::toolchain_not_found(
            "`brew --prefix gcc` printed nothing",
        ));
    }

    Ok(PathBuf::from(prefix))
}

/// Parse the version suffix of a `gcc-<version>` file name.
fn parse_gcc_version(file_name: &str) -> Option<Version> {
    let caps = VERSIONED_GCC.captures(file_name)?;
    let mut parts = caps[1].split('.').map(|p| p.parse::<u64>());

    let major = parts.next()?.ok()?;
    let minor = parts.next().transpose().ok()?.unwrap_or(0);
    let patch = parts.next().transpose().ok()?.unwrap_or(0);

    Some(Version::new(major, minor, patch))
}

/// Pick the highest-versioned `gcc-<version>` binary in `bin_dir`.
///
/// Ties on version are broken by file name, so the result never depends on
/// directory enumeration order.
pub fn select_versioned_gcc(bin_dir: &Path) -> Result<PathBuf, BuildError> {
    let entries = std::fs::read_dir(bin_dir).map_err(|e| {
        BuildError::toolchain_not_found(format!("cannot read {}: {}", bin_dir.display(), e))
    })?;

    let mut candidates: Vec<(Version, String, PathBuf)> = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| {
            BuildError::toolchain_not_found(format!("cannot read {}: {}", bin_dir.display(), e))
        })?;

        let name = entry.file_name().to_string_lossy().into_owned();
        let Some(version) = parse_gcc_version(&name) else {
            continue;
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        tracing::debug!("Found compiler candidate: {}", path.display());
        candidates.push((version, name, path));
    }

    candidates
        .into_iter()
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
        .map(|(_, _, path)| path)
        .ok_or_else(|| {
            BuildError::toolchain_not_found(format!(
                "no gcc-<version> binary in {}",
                bin_dir.display()
            ))
        })
}

/// Resolve the Homebrew gcc binary to use on macOS.
pub fn find_homebrew_gcc(configured_prefix: Option<&Path>) -> Result<PathBuf, BuildError> {
    let prefix = gcc_prefix(configured_prefix)?;
    select_versioned_gcc(&prefix.join("bin"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fake_gcc_prefix;
    use tempfile::TempDir;

    #[test]
    fn test_parse_gcc_version() {
        assert_eq!(parse_gcc_version("gcc-13"), Some(Version::new(13, 0, 0)));
        assert_eq!(parse_gcc_version("gcc-13.2"), Some(Version::new(13, 2, 0)));
        assert_eq!(parse_gcc_version("gcc-9.4.1"), Some(Version::new(9, 4, 1)));
        assert_eq!(parse_gcc_version("gcc-ar-13"), None);
        assert_eq!(parse_gcc_version("gcc-nm-13"), None);
        assert_eq!(parse_gcc_version("gcc"), None);
        assert_eq!(parse_gcc_version("x86_64-apple-darwin23-gcc-13"), None);
    }

    #[test]
    fn test_single_candidate() {
        let tmp = TempDir::new().unwrap();
        let prefix = fake_gcc_prefix(tmp.path(), &["gcc-13", "gcc-ar-13", "g++-13"]);

        let gcc = find_homebrew_gcc(Some(&prefix)).unwrap();
        assert_eq!(gcc, prefix.join("bin").join("gcc-13"));
    }

    #[test]
    fn test_highest_version_wins() {
        let tmp = TempDir::new().unwrap();
        let prefix = fake_gcc_prefix(tmp.path(), &["gcc-9", "gcc-14", "gcc-13.2"]);

        let gcc = select_versioned_gcc(&prefix.join("bin")).unwrap();
        assert_eq!(gcc, prefix.join("bin").join("gcc-14"));
    }

    #[test]
    fn test_no_candidates() {
        let tmp = TempDir::new().unwrap();
        let prefix = fake_gcc_prefix(tmp.path(), &["gcc-ar-13", "cpp-13"]);

        let err = find_homebrew_gcc(Some(&prefix)).unwrap_err();
        assert!(matches!(err, BuildError::ToolchainNotFound { .. }));
    }

    #[test]
    fn test_missing_bin_dir() {
        let tmp = TempDir::new().unwrap();

        let err = find_homebrew_gcc(Some(&tmp.path().join("nope"))).unwrap_err();
        assert!(matches!(err, BuildError::ToolchainNotFound { .. }));
    }

    #[test]
    fn test_directories_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let prefix = fake_gcc_prefix(tmp.path(), &[]);
        std::fs::create_dir_all(prefix.join("bin").join("gcc-15")).unwrap();

        let err = select_versioned_gcc(&prefix.join("bin")).unwrap_err();
        assert!(matches!(err, BuildError::ToolchainNotFound { .. }));
    }
}
