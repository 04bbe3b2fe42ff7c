use serde::{Deserialize, Serialize};

use crate::error::{Result, UmbralError};
use crate::integral::IntegralImage;
use crate::raster::Raster;

/// Parameters for locally-adaptive mean thresholding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdParams {
    /// Side length of the square neighborhood; must be odd and > 1.
    pub window_size: usize,
    /// Constant subtracted from the local mean before comparing.
    pub c: i32,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            window_size: 31,
            c: 5,
        }
    }
}

impl ThresholdParams {
    pub fn radius(&self) -> usize {
        self.window_size / 2
    }
}

/// Check everything the kernel assumes, before any pixel is touched.
pub(crate) fn validate_inputs(
    raster: &Raster,
    integral: &IntegralImage,
    params: &ThresholdParams,
) -> Result<()> {
    if params.window_size <= 1 || params.window_size % 2 == 0 {
        return Err(UmbralError::InvalidWindowSize(params.window_size));
    }
    let expected = raster.width() * raster.height();
    let actual = integral.width() * integral.height();
    if raster.width() != integral.width() || raster.height() != integral.height() {
        return Err(UmbralError::SizeMismatch { expected, actual });
    }
    Ok(())
}

/// Apply the threshold decision to the half-open global row range
/// `[start_row, end_row)`, writing one output byte per pixel into `out`
/// (length `(end_row - start_row) * width`).
///
/// Per pixel: clamp the `window_size` square to the image (the window
/// shrinks near borders, no wraparound or mirroring), take the mean of
/// the clamped window from the integral image, and emit 255 iff the
/// pixel strictly exceeds `mean - c`. Equality is background.
///
/// Pixels are independent given the read-only raster and table, so this
/// may run concurrently over disjoint row ranges without coordination.
pub fn threshold_rows(
    raster: &Raster,
    integral: &IntegralImage,
    params: &ThresholdParams,
    start_row: usize,
    end_row: usize,
    out: &mut [u8],
) {
    let width = raster.width();
    let height = raster.height();
    let radius = params.radius();
    debug_assert_eq!(out.len(), (end_row - start_row) * width);

    for r in start_row..end_row {
        // Vertical window bounds, clamped.
        let r0 = r.saturating_sub(radius);
        let r1 = (r + radius).min(height - 1);

        let out_row = &mut out[(r - start_row) * width..(r - start_row + 1) * width];
        for (c, out_px) in out_row.iter_mut().enumerate() {
            // Horizontal window bounds, clamped.
            let c0 = c.saturating_sub(radius);
            let c1 = (c + radius).min(width - 1);

            let area = ((r1 - r0 + 1) * (c1 - c0 + 1)) as f64;
            let sum = integral.window_sum(r0, c0, r1, c1);

            let mean = sum as f64 / area;
            let thresh = mean - f64::from(params.c);

            *out_px = if f64::from(raster.get(r, c)) > thresh {
                255
            } else {
                0
            };
        }
    }
}
