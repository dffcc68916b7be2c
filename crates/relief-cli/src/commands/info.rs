use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use relief_core::io::image_io::probe;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file (PNG or TIFF)
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let info = probe(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    println!("File:           {}", args.file.display());
    println!("Dimensions:     {}x{}", info.width, info.height);
    println!("Color channels: {}", info.color_channels);
    println!("Bit depth:      {}", info.bit_depth);

    if info.color_channels < 2 {
        println!("Note: not usable as a normal map (needs red and green channels)");
    }

    Ok(())
}
