//! Test fixtures for chils-build unit tests.
//!
//! Provides fake build tools and fake Homebrew installations so the build
//! pipeline can be exercised without a real compiler.

use std::fs;
use std::path::{Path, PathBuf};

/// How a fake `make` behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeMake {
    /// Write its last argument (the target) as a file and exit 0
    WriteTarget,
    /// Exit 0 without producing anything
    NoArtifact,
    /// Exit with the given status
    Fail(i32),
}

/// Write an executable fake `make` script into `dir` and return its path.
///
/// Every variant records its arguments in `make-args` in the directory it
/// is run from.
#[cfg(unix)]
pub fn fake_make(dir: &Path, behavior: FakeMake) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let action = match behavior {
        FakeMake::WriteTarget => {
            "for target; do :; done\nprintf 'built by fake make\\n' > \"$target\"\n".to_string()
        }
        FakeMake::NoArtifact => String::new(),
        FakeMake::Fail(code) => format!("echo 'make: *** [libCHILS.so] Error {code}' >&2\nexit {code}\n"),
    };
    let script = format!("#!/bin/sh\nprintf '%s\\n' \"$*\" > make-args\n{action}exit 0\n");

    let path = dir.join("fake-make");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Create a fake Homebrew gcc prefix under `root` whose `bin` holds empty
/// files with the given names. Returns the prefix.
pub fn fake_gcc_prefix(root: &Path, binaries: &[&str]) -> PathBuf {
    let prefix = root.join("opt").join("gcc");
    let bin = prefix.join("bin");
    fs::create_dir_all(&bin).unwrap();
    for name in binaries {
        fs::write(bin.join(name), "").unwrap();
    }
    prefix
}

/// Lay out a minimal `python/chils` package in `work_dir`.
pub fn write_package_sources(work_dir: &Path) {
    let pkg = work_dir.join("python").join("chils");
    fs::create_dir_all(pkg.join("__pycache__")).unwrap();
    fs::write(pkg.join("__init__.py"), "from .chils import CHILS\n").unwrap();
    fs::write(
        pkg.join("chils.py"),
        "import ctypes\nimport os\n\nclass CHILS:\n    pass\n",
    )
    .unwrap();
    fs::write(pkg.join("__pycache__").join("chils.cpython-312.pyc"), "cache").unwrap();
}
