//! High-level operations

pub mod chils_build;
pub mod pipeline;

pub use chils_build::{build, plan, BuildOptions, BuildPlan, BuildResult};
pub use pipeline::{PackagingContext, PackagingStep, Pipeline};
