pub mod bench;
pub mod config;
pub mod info;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use umbral_core::raster::Raster;

/// Decode any supported image format to an 8-bit grayscale raster.
pub fn load_raster(path: &Path) -> Result<Raster> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .to_luma8();
    let (width, height) = img.dimensions();
    let raster = Raster::new(width as usize, height as usize, img.into_raw())?;
    Ok(raster)
}

/// Encode a raster, format chosen from the file extension.
pub fn save_raster(raster: &Raster, path: &Path) -> Result<()> {
    let (width, height) = (raster.width() as u32, raster.height() as u32);
    let pixels = raster.clone().into_raw();
    let img = image::GrayImage::from_raw(width, height, pixels)
        .expect("buffer size matches dimensions");
    img.save(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}
