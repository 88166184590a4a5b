//! chils-build - builds the CHILS native library and stages it for packaging
//!
//! This crate selects a C toolchain for the host, runs the native build, and
//! places the resulting shared library in the package directory where the
//! runtime loader expects it.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test fixtures: fake build tools and fake compiler installations.
#[cfg(test)]
pub mod test_support;

pub use builder::{BuildError, CompilerSpec, ResolvedToolchain, StagedArtifact};
pub use core::{ArtifactName, PackageLayout, PlatformClass};
pub use ops::{build, plan, BuildOptions, BuildPlan, BuildResult};
pub use util::context::GlobalContext;
