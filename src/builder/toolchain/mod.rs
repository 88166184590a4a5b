//! Toolchain resolution.
//!
//! Maps a [`PlatformClass`] to the compiler passed to the native build and
//! the library file name it is asked to produce.

mod detect;

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::builder::errors::BuildError;
use crate::core::{ArtifactName, PackageLayout, PlatformClass};
use crate::util::config::ToolchainSettings;

pub use detect::{find_homebrew_gcc, gcc_prefix, select_versioned_gcc};

/// Compiler name used on Windows (MinGW) and Linux-like hosts.
pub const DEFAULT_CC: &str = "gcc";

/// How to invoke the C compiler: a bare name looked up on PATH by the build
/// tool, or a full path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompilerSpec(PathBuf);

impl CompilerSpec {
    pub fn new(compiler: impl Into<PathBuf>) -> Self {
        CompilerSpec(compiler.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Value for the `CC=` build variable, for display.
    pub fn make_value(&self) -> String {
        self.0.display().to_string()
    }

    /// The `CC=<compiler>` build argument, with the path bytes untouched.
    pub fn make_arg(&self) -> OsString {
        let mut arg = OsString::from("CC=");
        arg.push(self.0.as_os_str());
        arg
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_os_str().is_empty()
    }
}

impl fmt::Display for CompilerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A compiler plus the target it should build, for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedToolchain {
    pub platform: PlatformClass,
    pub compiler: CompilerSpec,
    pub artifact: ArtifactName,
}

/// Resolve the compiler and artifact name for `platform`.
///
/// A configured `cc` replaces the platform default everywhere. Without one,
/// macOS requires a Homebrew `gcc-<version>` binary and fails with
/// [`BuildError::ToolchainNotFound`] rather than falling back to `gcc`.
pub fn resolve_toolchain(
    platform: PlatformClass,
    settings: &ToolchainSettings,
    layout: &PackageLayout,
) -> Result<ResolvedToolchain, BuildError> {
    let artifact = layout.artifact(platform);

    let compiler = match (&settings.cc, platform) {
        (Some(cc), _) if !cc.as_os_str().is_empty() => {
            tracing::debug!("Using configured compiler: {}", cc.display());
            CompilerSpec::new(cc)
        }
        (_, PlatformClass::Darwin) => {
            CompilerSpec::new(find_homebrew_gcc(settings.gcc_prefix.as_deref())?)
        }
        (_, PlatformClass::Windows | PlatformClass::OtherUnix) => CompilerSpec::new(DEFAULT_CC),
    };

    tracing::debug!(
        "Resolved toolchain for {}: CC={} target={}",
        platform,
        compiler,
        artifact
    );

    Ok(ResolvedToolchain {
        platform,
        compiler,
        artifact,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fake_gcc_prefix;
    use tempfile::TempDir;

    #[test]
    fn test_windows_toolchain() {
        let tc = resolve_toolchain(
            PlatformClass::Windows,
            &ToolchainSettings::default(),
            &PackageLayout::default(),
        )
        .unwrap();

        assert_eq!(tc.compiler, CompilerSpec::new("gcc"));
        assert_eq!(tc.artifact.as_str(), "libCHILS.dll");
    }

    #[test]
    fn test_other_unix_toolchain() {
        let tc = resolve_toolchain(
            PlatformClass::OtherUnix,
            &ToolchainSettings::default(),
            &PackageLayout::default(),
        )
        .unwrap();

        assert_eq!(tc.compiler.make_value(), "gcc");
        assert_eq!(tc.artifact.as_str(), "libCHILS.so");
    }

    #[test]
    fn test_darwin_toolchain_uses_homebrew_gcc() {
        let tmp = TempDir::new().unwrap();
        let prefix = fake_gcc_prefix(tmp.path(), &["gcc-13"]);
        let settings = ToolchainSettings {
            cc: None,
            gcc_prefix: Some(prefix.clone()),
        };

        let tc = resolve_toolchain(PlatformClass::Darwin, &settings, &PackageLayout::default())
            .unwrap();

        assert_eq!(tc.compiler.as_path(), prefix.join("bin").join("gcc-13"));
        assert_eq!(tc.artifact.as_str(), "libCHILS.so");
    }

    #[test]
    fn test_darwin_without_gcc_fails() {
        let tmp = TempDir::new().unwrap();
        let prefix = fake_gcc_prefix(tmp.path(), &[]);
        let settings = ToolchainSettings {
            cc: None,
            gcc_prefix: Some(prefix),
        };

        let err = resolve_toolchain(PlatformClass::Darwin, &settings, &PackageLayout::default())
            .unwrap_err();
        assert!(matches!(err, BuildError::ToolchainNotFound { .. }));
    }

    #[test]
    fn test_every_platform_has_a_compiler() {
        let tmp = TempDir::new().unwrap();
        let settings = ToolchainSettings {
            cc: None,
            gcc_prefix: Some(fake_gcc_prefix(tmp.path(), &["gcc-14"])),
        };

        for platform in [
            PlatformClass::Windows,
            PlatformClass::Darwin,
            PlatformClass::OtherUnix,
        ] {
            let tc = resolve_toolchain(platform, &settings, &PackageLayout::default()).unwrap();
            assert!(!tc.compiler.is_empty());
            assert_eq!(tc.platform, platform);
        }
    }

    #[test]
    fn test_configured_cc_overrides_platform_default() {
        let settings = ToolchainSettings {
            cc: Some(PathBuf::from("/usr/bin/clang")),
            gcc_prefix: None,
        };

        // No Homebrew lookup happens when cc is set.
        let tc = resolve_toolchain(PlatformClass::Darwin, &settings, &PackageLayout::default())
            .unwrap();
        assert_eq!(tc.compiler.make_value(), "/usr/bin/clang");
    }

    #[test]
    fn test_custom_library_name() {
        let layout = PackageLayout {
            library: "FOO".to_string(),
            ..PackageLayout::default()
        };

        let tc = resolve_toolchain(PlatformClass::Windows, &ToolchainSettings::default(), &layout)
            .unwrap();
        assert_eq!(tc.artifact.as_str(), "libFOO.dll");
    }
}
