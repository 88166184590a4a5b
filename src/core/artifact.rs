//! Native artifact naming and package layout.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::platform::PlatformClass;

/// Package subdirectory the library is staged into.
pub const DEFAULT_PACKAGE_NAME: &str = "chils";

/// Base name of the native library.
pub const DEFAULT_LIBRARY_NAME: &str = "CHILS";

/// Directory holding the package's Python sources.
pub const DEFAULT_SOURCE_ROOT: &str = "python";

/// Platform-specific file name of the built shared library
/// (e.g. `libCHILS.so`). Also the build target name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ArtifactName(String);

impl ArtifactName {
    /// The artifact for `library` on `platform`.
    pub fn for_platform(library: &str, platform: PlatformClass) -> Self {
        ArtifactName(format!(
            "lib{}.{}",
            library,
            platform.shared_lib_extension()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for ArtifactName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// Where things live inside the working directory and the build output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageLayout {
    /// Package subdirectory under the output root
    pub package: String,
    /// Library base name
    pub library: String,
    /// Package source root, relative to the working directory
    pub source_root: PathBuf,
}

impl Default for PackageLayout {
    fn default() -> Self {
        PackageLayout {
            package: DEFAULT_PACKAGE_NAME.to_string(),
            library: DEFAULT_LIBRARY_NAME.to_string(),
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
        }
    }
}

impl PackageLayout {
    /// Destination directory for the artifact: `<output_root>/<package>`.
    pub fn package_dir(&self, output_root: &Path) -> PathBuf {
        output_root.join(&self.package)
    }

    pub fn artifact(&self, platform: PlatformClass) -> ArtifactName {
        ArtifactName::for_platform(&self.library, platform)
    }
}
