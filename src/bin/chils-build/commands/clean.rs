//! `chils-build clean` command

use anyhow::{bail, Result};

use crate::cli::CleanArgs;
use chils_build::util::fs::remove_dir_all_if_exists;

pub fn execute(args: CleanArgs) -> Result<()> {
    let ctx = super::context(args.work_dir)?;
    let config = ctx.load_config();

    let out = args.out.unwrap_or_else(|| config.out_dir());
    let out = ctx.resolve(&out);

    // The output root must not be, or contain, the checkout itself.
    let work_dir = ctx.work_dir();
    let work_dir = work_dir.canonicalize().unwrap_or_else(|_| work_dir.to_path_buf());
    let out_abs = out.canonicalize().unwrap_or_else(|_| out.clone());
    if work_dir.starts_with(&out_abs) {
        bail!(
            "refusing to remove {}: it contains the working directory {}",
            out.display(),
            work_dir.display()
        );
    }

    remove_dir_all_if_exists(&out)?;
    eprintln!("     Removed {}", out.display());

    Ok(())
}
