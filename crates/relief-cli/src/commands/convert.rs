use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::debug;

use relief_core::io::image_io::{load_normal_map, save_height_map};
use relief_core::pipeline::{normal_to_height, HeightConfig};
use relief_core::tiling::TileMode;

use crate::summary::print_convert_summary;

#[derive(Clone, Copy, ValueEnum)]
pub enum TilingArg {
    /// Input already tiles; integrate it directly
    Seamless,
    /// Mirror-expand the gradients first (takes more RAM to compute)
    NonSeamless,
}

impl From<TilingArg> for TileMode {
    fn from(arg: TilingArg) -> Self {
        match arg {
            TilingArg::Seamless => TileMode::Seamless,
            TilingArg::NonSeamless => TileMode::NonSeamless,
        }
    }
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Input normal map files (PNG or TIFF)
    pub files: Vec<PathBuf>,

    /// Tiling mode of the input
    #[arg(long, value_enum, default_value = "seamless")]
    pub tiling: TilingArg,

    /// Output file path (single input only; default: <input>_height.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read conversion settings from a TOML file instead of flags
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Derive `<stem>_height.png` next to the input file.
fn derive_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("normal");
    input.with_file_name(format!("{stem}_height.png"))
}

fn convert_one(file: &Path, config: &HeightConfig) -> Result<PathBuf> {
    let out = derive_output(file);
    let map =
        load_normal_map(file).with_context(|| format!("Failed to load {}", file.display()))?;
    let height = normal_to_height(&map, config);
    save_height_map(&height, &out)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    debug!(input = %file.display(), output = %out.display(), "Converted");
    Ok(out)
}

pub fn run(args: &ConvertArgs) -> Result<()> {
    if args.files.is_empty() {
        bail!("No input files given");
    }
    if args.output.is_some() && args.files.len() > 1 {
        bail!("--output applies to a single input; batch outputs use the _height suffix");
    }

    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => HeightConfig {
            tile_mode: args.tiling.into(),
        },
    };

    if args.files.len() == 1 {
        let file = &args.files[0];
        let out = args
            .output
            .clone()
            .unwrap_or_else(|| derive_output(file));
        let map = load_normal_map(file)
            .with_context(|| format!("Failed to load {}", file.display()))?;
        let height = normal_to_height(&map, &config);
        save_height_map(&height, &out)
            .with_context(|| format!("Failed to write {}", out.display()))?;
        print_convert_summary(file, &out, &config, map.width(), map.height());
        return Ok(());
    }

    let pb = ProgressBar::new(args.files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Converting");

    let results: Vec<(PathBuf, Result<PathBuf>)> = args
        .files
        .par_iter()
        .map(|file| {
            let res = convert_one(file, &config);
            pb.inc(1);
            (file.clone(), res)
        })
        .collect();
    pb.finish_with_message("Done");

    let mut failed = 0usize;
    for (file, res) in &results {
        match res {
            Ok(out) => println!("{} -> {}", file.display(), out.display()),
            Err(e) => {
                failed += 1;
                eprintln!("{}: {e:#}", file.display());
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} conversions failed", results.len());
    }

    Ok(())
}
