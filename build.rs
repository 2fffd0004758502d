use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use fs_extra::dir::{CopyOptions, copy};

/// Mirrors `assets/` next to the build output so binaries can ship with
/// their scene files and textures.
fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=assets");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let assets = manifest_dir.join("assets");
    if !assets.is_dir() {
        return Ok(());
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let options = CopyOptions {
        overwrite: true,
        ..CopyOptions::new()
    };
    copy(&assets, &out_dir, &options)
        .with_context(|| format!("could not copy {} into {}", assets.display(), out_dir.display()))?;

    Ok(())
}
