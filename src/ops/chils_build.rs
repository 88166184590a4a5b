//! Build-and-stage operation.
//!
//! Detects the platform, resolves the toolchain, then runs the packaging
//! pipeline: build the native library and stage it, followed by copying the
//! package sources into the output tree.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::builder::make::{MakeInvocation, DEFAULT_MAKE};
use crate::builder::{resolve_toolchain, stage_artifact, ResolvedToolchain};
use crate::core::{ArtifactName, PackageLayout, PlatformClass};
use crate::ops::pipeline::{PackagingContext, PackagingStep, Pipeline};
use crate::util::config::{Config, ToolchainSettings};
use crate::util::fs::copy_tree;
use crate::util::GlobalContext;

/// Options for a build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory containing the makefile and package sources
    pub work_dir: PathBuf,
    /// Packaging build tree to stage into
    pub output_root: PathBuf,
    /// Platform override (None = detect the host)
    pub platform: Option<PlatformClass>,
    pub toolchain: ToolchainSettings,
    /// Build tool (None = `make`)
    pub make: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub layout: PackageLayout,
}

impl BuildOptions {
    /// Defaults for building in `work_dir` and staging into `output_root`.
    pub fn new(work_dir: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        BuildOptions {
            work_dir: work_dir.into(),
            output_root: output_root.into(),
            platform: None,
            toolchain: ToolchainSettings::default(),
            make: None,
            jobs: None,
            layout: PackageLayout::default(),
        }
    }

    /// Options taken from merged configuration, relative paths resolved
    /// against the context's working directory.
    pub fn from_config(ctx: &GlobalContext, config: &Config) -> Self {
        BuildOptions {
            work_dir: ctx.work_dir().to_path_buf(),
            output_root: ctx.resolve(&config.out_dir()),
            platform: None,
            toolchain: config.toolchain.clone(),
            make: config.build.make.clone(),
            jobs: config.build.jobs,
            layout: PackageLayout {
                package: config.package_name().to_string(),
                library: config.library_name().to_string(),
                source_root: config.source_root(),
            },
        }
    }

    fn packaging_context(&self) -> PackagingContext {
        PackagingContext::new(&self.work_dir, &self.output_root, self.layout.clone())
    }

    fn invocation(&self, toolchain: &ResolvedToolchain) -> MakeInvocation {
        MakeInvocation::new(toolchain, &self.work_dir)
            .with_program(self.make.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_MAKE)))
            .with_jobs(self.jobs)
    }
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub toolchain: ResolvedToolchain,
    /// Staged library path
    pub library: PathBuf,
    /// Every file written under the output root
    pub files: Vec<PathBuf>,
}

/// Everything a build would do, without doing it.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    pub platform: PlatformClass,
    pub compiler: String,
    pub artifact: String,
    pub command: String,
    pub work_dir: PathBuf,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub package_sources: PathBuf,
}

/// Builds the native library and stages it into the package directory.
pub struct BuildAndStage {
    invocation: MakeInvocation,
    toolchain: ResolvedToolchain,
}

impl BuildAndStage {
    pub fn new(invocation: MakeInvocation, toolchain: ResolvedToolchain) -> Self {
        BuildAndStage {
            invocation,
            toolchain,
        }
    }
}

impl PackagingStep for BuildAndStage {
    fn name(&self) -> &str {
        "build-native"
    }

    fn run(&mut self, ctx: &PackagingContext) -> Result<Vec<PathBuf>> {
        self.invocation.run()?;

        let staged = stage_artifact(&self.toolchain.artifact, &ctx.work_dir, &ctx.package_dir())?;
        tracing::debug!(
            "Copied {} -> {} (sha256 {})",
            staged.source.display(),
            staged.destination.display(),
            staged.sha256
        );

        Ok(vec![staged.destination])
    }
}

/// Copies the package sources into the output root.
///
/// Bytecode caches are skipped, and so is any copy of the native library
/// sitting in the sources: the freshly staged build must not be replaced. A
/// missing source root is not an error; the package then ships the native
/// library alone.
#[derive(Debug)]
pub struct CopyPackageSources {
    artifact: ArtifactName,
}

impl CopyPackageSources {
    pub fn new(artifact: ArtifactName) -> Self {
        CopyPackageSources { artifact }
    }
}

fn is_bytecode_cache(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    name == "__pycache__" || name.ends_with(".pyc")
}

impl PackagingStep for CopyPackageSources {
    fn name(&self) -> &str {
        "copy-sources"
    }

    fn run(&mut self, ctx: &PackagingContext) -> Result<Vec<PathBuf>> {
        let source_root = ctx.source_root();
        if !source_root.is_dir() {
            tracing::warn!(
                "Package source directory {} not found, skipping",
                source_root.display()
            );
            return Ok(Vec::new());
        }

        let stale_library = source_root.join(&ctx.layout.package).join(&self.artifact);
        let skip = |path: &Path| {
            if path == stale_library {
                tracing::warn!(
                    "Ignoring {}; the freshly built library is staged instead",
                    path.display()
                );
                return true;
            }
            is_bytecode_cache(path)
        };

        let files = copy_tree(&source_root, &ctx.output_root, skip)
            .with_context(|| format!("failed to copy sources from {}", source_root.display()))?;
        tracing::info!(
            "Copied {} package files into {}",
            files.len(),
            ctx.output_root.display()
        );

        Ok(files)
    }
}

fn resolve(opts: &BuildOptions) -> Result<ResolvedToolchain> {
    let platform = opts.platform.unwrap_or_else(PlatformClass::detect);
    tracing::debug!("Platform: {}", platform);

    Ok(resolve_toolchain(platform, &opts.toolchain, &opts.layout)?)
}

/// Resolve the toolchain and describe the build without running it.
pub fn plan(opts: &BuildOptions) -> Result<BuildPlan> {
    let toolchain = resolve(opts)?;
    let invocation = opts.invocation(&toolchain);
    let ctx = opts.packaging_context();

    Ok(BuildPlan {
        platform: toolchain.platform,
        compiler: toolchain.compiler.make_value(),
        artifact: toolchain.artifact.to_string(),
        command: invocation.display_command(),
        work_dir: opts.work_dir.clone(),
        source: opts.work_dir.join(&toolchain.artifact),
        destination: ctx.package_dir().join(&toolchain.artifact),
        package_sources: ctx.source_root(),
    })
}

/// Build the native library, stage it, then copy the package sources.
///
/// Any failure aborts the whole operation: nothing after the failing step
/// runs. Typed causes are available with `downcast_ref::<BuildError>()`.
pub fn build(opts: &BuildOptions) -> Result<BuildResult> {
    let toolchain = resolve(opts)?;
    let ctx = opts.packaging_context();

    let pipeline = Pipeline::new()
        .then(BuildAndStage::new(opts.invocation(&toolchain), toolchain.clone()))
        .then(CopyPackageSources::new(toolchain.artifact.clone()));

    let report = pipeline.run(&ctx)?;

    Ok(BuildResult {
        library: ctx.package_dir().join(&toolchain.artifact),
        toolchain,
        files: report.files,
    })
}
