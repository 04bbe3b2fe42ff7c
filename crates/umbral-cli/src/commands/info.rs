use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::summary;

#[derive(Args)]
pub struct InfoArgs {
    /// Image file to inspect
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let raster = super::load_raster(&args.file)?;

    let pixels = raster.as_slice();
    let min = pixels.iter().copied().min().unwrap_or(0);
    let max = pixels.iter().copied().max().unwrap_or(0);
    let mean = pixels.iter().map(|&p| f64::from(p)).sum::<f64>() / pixels.len() as f64;

    summary::print_info(&args.file, raster.width(), raster.height(), min, max, mean);
    Ok(())
}
