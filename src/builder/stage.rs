//! Artifact staging.
//!
//! Copies the freshly built library from the working directory into
//! `<output_root>/<package>/`, where the runtime loader looks for it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::builder::errors::BuildError;
use crate::core::ArtifactName;
use crate::util::hash::sha256_file;

/// A library copied into the build output tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedArtifact {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Size in bytes
    pub size: u64,
    pub sha256: String,
}

/// Copy `work_dir/<artifact>` to `package_dir/<artifact>`.
///
/// The source is checked before anything is created, so a missing artifact
/// leaves the output tree untouched. An existing destination file is
/// overwritten.
pub fn stage_artifact(
    artifact: &ArtifactName,
    work_dir: &Path,
    package_dir: &Path,
) -> Result<StagedArtifact, BuildError> {
    let source = work_dir.join(artifact);
    if !source.is_file() {
        return Err(BuildError::ArtifactNotFound { path: source });
    }

    fs::create_dir_all(package_dir).map_err(|e| BuildError::StagingIo {
        action: "create directory",
        path: package_dir.to_path_buf(),
        source: e,
    })?;

    let destination = package_dir.join(artifact);
    let size = fs::copy(&source, &destination).map_err(|e| BuildError::StagingIo {
        action: "copy artifact to",
        path: destination.clone(),
        source: e,
    })?;

    let sha256 = sha256_file(&destination).map_err(|e| BuildError::StagingIo {
        action: "read back",
        path: destination.clone(),
        source: e,
    })?;

    tracing::info!(
        "Staged {} -> {} ({} bytes)",
        artifact,
        destination.display(),
        size
    );

    Ok(StagedArtifact {
        source,
        destination,
        size,
        sha256,
    })
}
