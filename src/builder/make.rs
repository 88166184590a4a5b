//! Native build invocation.
//!
//! Runs `make CC=<compiler> <target>` in the working directory and waits
//! for it. The build tool's output goes straight to the user's terminal.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::builder::errors::BuildError;
use crate::builder::toolchain::ResolvedToolchain;
use crate::util::process::ProcessBuilder;

/// Build tool used when none is configured.
pub const DEFAULT_MAKE: &str = "make";

/// A single native build invocation.
#[derive(Debug, Clone)]
pub struct MakeInvocation {
    /// Build tool to run
    pub program: PathBuf,
    /// Directory containing the makefile; the artifact is written here
    pub work_dir: PathBuf,
    /// `CC=<compiler>` argument
    pub cc: OsString,
    /// Target to build
    pub target: String,
    /// `-j` value
    pub jobs: Option<usize>,
}

impl MakeInvocation {
    /// Invocation building `toolchain.artifact` with `toolchain.compiler`.
    pub fn new(toolchain: &ResolvedToolchain, work_dir: impl AsRef<Path>) -> Self {
        MakeInvocation {
            program: PathBuf::from(DEFAULT_MAKE),
            work_dir: work_dir.as_ref().to_path_buf(),
            cc: toolchain.compiler.make_arg(),
            target: toolchain.artifact.to_string(),
            jobs: None,
        }
    }

    /// Use a different build tool (e.g. `mingw32-make`).
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    fn process(&self) -> ProcessBuilder {
        let mut pb = ProcessBuilder::new(&self.program).cwd(&self.work_dir);
        if let Some(jobs) = self.jobs {
            pb = pb.arg("-j").arg(jobs.to_string());
        }
        pb.arg(&self.cc).arg(&self.target)
    }

    /// The command line, as shown to the user.
    pub fn display_command(&self) -> String {
        self.process().display_command()
    }

    /// Run the build and block until it exits.
    ///
    /// Any non-zero exit, or failure to start the build tool at all, is
    /// [`BuildError::BuildFailed`].
    pub fn run(&self) -> Result<(), BuildError> {
        let pb = self.process();
        let command = pb.display_command();

        tracing::info!("Building {} in {}", self.target, self.work_dir.display());
        tracing::debug!("Running `{}`", command);

        let status = pb.status().map_err(|e| BuildError::BuildFailed {
            command: command.clone(),
            code: None,
            detail: format!("could not start `{}`: {}", self.program.display(), e),
        })?;

        if !status.success() {
            let detail = match status.code() {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            };
            return Err(BuildError::BuildFailed {
                command,
                code: status.code(),
                detail,
            });
        }

        Ok(())
    }
}
