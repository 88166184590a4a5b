//! Subprocess execution utilities.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

use anyhow::{bail, Context, Result};

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_os_string()));
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Get the working directory, if one was set.
    pub fn get_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute the command, capturing stdout and stderr.
    pub fn exec(&self) -> Result<Output> {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        cmd.output()
            .with_context(|| format!("failed to execute `{}`", self.display_command()))
    }

    /// Execute and require success.
    pub fn exec_and_check(&self) -> Result<Output> {
        let output = self.exec()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "`{}` failed with exit code {:?}\n{}",
                self.display_command(),
                output.status.code(),
                stderr.trim_end()
            );
        }
        Ok(output)
    }

    /// Execute with inherited stdio and return the exit status.
    ///
    /// Blocks until the child terminates.
    pub fn status(&self) -> std::io::Result<ExitStatus> {
        self.build_command().status()
    }

    /// Display the command for error messages.
    ///
    /// Lossy; the arguments passed to the child are not.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("make").args(["CC=gcc", "libCHILS.so"]);

        assert_eq!(pb.display_command(), "make CC=gcc libCHILS.so");
    }

    #[test]
    fn test_cwd_is_recorded() {
        let pb = ProcessBuilder::new("make").cwd("/tmp/work");
        assert_eq!(pb.get_cwd(), Some(Path::new("/tmp/work")));
        assert!(pb.get_args().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_args_reach_the_child_intact() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let raw = OsStr::from_bytes(b"caf\xe9");
        let pb = ProcessBuilder::new("printf").arg("%s").arg(raw);
        assert_eq!(pb.get_args()[1], raw);
        assert_eq!(pb.display_command(), "printf %s caf\u{FFFD}");

        let output = pb.exec().unwrap();
        assert_eq!(OsString::from_vec(output.stdout), raw);
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_captures_stdout() {
        let output = ProcessBuilder::new("echo").arg("hello").exec().unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert_eq!(stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_and_check_reports_failure() {
        let err = ProcessBuilder::new("sh")
            .args(["-c", "exit 3"])
            .exec_and_check()
            .unwrap_err();
        assert!(err.to_string().contains("Some(3)"));
    }

    #[cfg(unix)]
    #[test]
    fn test_status_runs_in_cwd() {
        let tmp = tempfile::TempDir::new().unwrap();
        let status = ProcessBuilder::new("sh")
            .args(["-c", "touch marker"])
            .cwd(tmp.path())
            .status()
            .unwrap();

        assert!(status.success());
        assert!(tmp.path().join("marker").exists());
    }
}
