//! Native library build: toolchain resolution, the make invocation, and
//! artifact staging.

pub mod errors;
pub mod make;
pub mod stage;
pub mod toolchain;

pub use errors::BuildError;
pub use make::MakeInvocation;
pub use stage::{stage_artifact, StagedArtifact};
pub use toolchain::{resolve_toolchain, CompilerSpec, ResolvedToolchain};
