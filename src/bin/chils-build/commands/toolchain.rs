//! `chils-build toolchain` command

use anyhow::Result;

use crate::cli::ToolchainArgs;
use chils_build::builder::make::DEFAULT_MAKE;
use chils_build::builder::resolve_toolchain;
use chils_build::ops::BuildOptions;
use chils_build::util::process::find_executable;

pub fn execute(args: ToolchainArgs) -> Result<()> {
    let ctx = super::context(args.work_dir)?;
    let config = ctx.load_config();
    let opts = BuildOptions::from_config(&ctx, &config);

    let platform = super::parse_platform(args.platform.as_deref())?
        .unwrap_or_else(chils_build::PlatformClass::detect);
    let toolchain = resolve_toolchain(platform, &opts.toolchain, &opts.layout)?;

    println!("Toolchain:");
    println!();
    println!("  Platform: {}", toolchain.platform);
    println!("  CC:       {}", toolchain.compiler);
    println!("  Target:   {}", toolchain.artifact);

    let make = opts
        .make
        .clone()
        .unwrap_or_else(|| DEFAULT_MAKE.into());
    match find_executable(&make.to_string_lossy()) {
        Some(path) => println!("  Make:     {}", path.display()),
        None => println!("  Make:     {} (not found)", make.display()),
    }

    println!();
    println!("Layout:");
    println!(
        "  Stage to: {}",
        opts.layout
            .package_dir(&opts.output_root)
            .join(&toolchain.artifact)
            .display()
    );
    println!(
        "  Sources:  {}",
        ctx.resolve(&opts.layout.source_root).display()
    );

    Ok(())
}
