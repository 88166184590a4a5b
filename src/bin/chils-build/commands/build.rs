//! `chils-build build` command

use anyhow::{Context, Result};

use crate::cli::BuildArgs;
use chils_build::ops::chils_build::{build, plan, BuildOptions};

pub fn execute(args: BuildArgs) -> Result<()> {
    let ctx = super::context(args.work_dir)?;
    let config = ctx.load_config();

    // CLI flags override config
    let mut opts = BuildOptions::from_config(&ctx, &config);
    opts.platform = super::parse_platform(args.platform.as_deref())?;
    if let Some(out) = args.out {
        opts.output_root = ctx.resolve(&out);
    }
    if args.cc.is_some() {
        opts.toolchain.cc = args.cc;
    }
    if args.make.is_some() {
        opts.make = args.make;
    }
    opts.jobs = args.jobs.or(opts.jobs);

    if args.plan {
        let plan = plan(&opts)?;
        let json = serde_json::to_string_pretty(&plan).context("failed to serialize build plan")?;
        println!("{}", json);
        return Ok(());
    }

    let result = build(&opts)?;

    eprintln!(
        "    Finished `{}` -> {}",
        result.toolchain.artifact,
        result.library.display()
    );

    Ok(())
}
