//! Ordered packaging pipeline.
//!
//! Steps run in insertion order against a shared [`PackagingContext`]. The
//! first failing step aborts the pipeline; later steps never run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::PackageLayout;

/// Inputs shared by every packaging step.
#[derive(Debug, Clone)]
pub struct PackagingContext {
    /// Directory holding the makefile and package sources
    pub work_dir: PathBuf,
    /// Packaging build tree the distributable is assembled from
    pub output_root: PathBuf,
    pub layout: PackageLayout,
}

impl PackagingContext {
    pub fn new(
        work_dir: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        layout: PackageLayout,
    ) -> Self {
        PackagingContext {
            work_dir: work_dir.into(),
            output_root: output_root.into(),
            layout,
        }
    }

    /// `<output_root>/<package>`
    pub fn package_dir(&self) -> PathBuf {
        self.layout.package_dir(&self.output_root)
    }

    /// Package sources inside the working directory.
    pub fn source_root(&self) -> PathBuf {
        self.work_dir.join(&self.layout.source_root)
    }
}

/// One stage of packaging.
pub trait PackagingStep {
    /// Short name used in logs and error context.
    fn name(&self) -> &str;

    /// Run the step, returning the files it wrote under the output root.
    fn run(&mut self, ctx: &PackagingContext) -> Result<Vec<PathBuf>>;
}

/// What a completed pipeline produced.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// Names of the steps that ran, in order
    pub steps: Vec<String>,
    /// Files written under the output root, in the order steps wrote them
    pub files: Vec<PathBuf>,
}

impl PipelineReport {
    pub fn contains(&self, path: &Path) -> bool {
        self.files.iter().any(|f| f == path)
    }
}

/// Steps run strictly in order; no step runs after a failure.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn PackagingStep>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline { steps: Vec::new() }
    }

    /// Append a step.
    pub fn then(mut self, step: impl PackagingStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn run(mut self, ctx: &PackagingContext) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();

        for step in &mut self.steps {
            let name = step.name().to_string();
            tracing::debug!("Running packaging step `{}`", name);

            let files = step
                .run(ctx)
                .with_context(|| format!("packaging step `{}` failed", name))?;

            report.steps.push(name);
            report.files.extend(files);
        }

        Ok(report)
    }
}
