//! Build and staging error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when Homebrew gcc is missing on macOS.
    pub const INSTALL_GCC: &str =
        "help: Run `brew install gcc`, or set `[toolchain] cc` in .chils-build/config.toml";

    /// Suggestion when the native build fails.
    pub const BUILD_FAILED: &str =
        "help: Run `chils-build build --verbose` to see the exact build command";

    /// Suggestion when the build produced something other than the expected file.
    pub const ARTIFACT_NOT_FOUND: &str =
        "help: Check that the makefile target name matches the library file it writes";
}

/// Fatal error while building or staging the native library.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no usable C compiler found: {reason}")]
    ToolchainNotFound { reason: String },

    #[error("native build `{command}` failed: {detail}")]
    BuildFailed {
        command: String,
        /// Exit code, if the build tool ran and exited normally
        code: Option<i32>,
        detail: String,
    },

    #[error("expected build artifact not found: {}", path.display())]
    ArtifactNotFound { path: PathBuf },

    #[error("failed to {action} {}", path.display())]
    StagingIo {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    pub fn toolchain_not_found(reason: impl Into<String>) -> Self {
        BuildError::ToolchainNotFound {
            reason: reason.into(),
        }
    }

    /// A suggested fix to show below the error, if one applies.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            BuildError::ToolchainNotFound { .. } => Some(suggestions::INSTALL_GCC),
            BuildError::BuildFailed { .. } => Some(suggestions::BUILD_FAILED),
            BuildError::ArtifactNotFound { .. } => Some(suggestions::ARTIFACT_NOT_FOUND),
            BuildError::StagingIo { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_io_keeps_source() {
        let err = BuildError::StagingIo {
            action: "create directory",
            path: PathBuf::from("build/lib/chils"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(err.to_string(), "failed to create directory build/lib/chils");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "denied");
        assert!(err.help().is_none());
    }

    #[test]
    fn test_build_failed_message() {
        let err = BuildError::BuildFailed {
            command: "make CC=gcc libCHILS.so".to_string(),
            code: Some(2),
            detail: "exit code 2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "native build `make CC=gcc libCHILS.so` failed: exit code 2"
        );
        assert_eq!(err.help(), Some(suggestions::BUILD_FAILED));
    }
}
