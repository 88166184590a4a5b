//! Core build-time types.

pub mod artifact;
pub mod platform;

pub use artifact::{ArtifactName, PackageLayout};
pub use platform::PlatformClass;
