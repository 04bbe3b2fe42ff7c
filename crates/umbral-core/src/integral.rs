use ndarray::Array2;

use crate::raster::Raster;

/// Summed-area table over a [`Raster`].
///
/// `values(r, c)` holds the sum of all pixels in the inclusive rectangle
/// `(0..=r, 0..=c)`. Built once, never mutated; every worker reads the
/// same table. The accumulator is u64 so no supported image size can
/// overflow it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegralImage {
    values: Array2<u64>,
}

impl IntegralImage {
    /// Build the table in a single top-to-bottom, left-to-right pass:
    /// each cell is the running horizontal sum of its row plus the cell
    /// above it.
    pub fn build(raster: &Raster) -> Self {
        let (h, w) = (raster.height(), raster.width());
        let mut values = Array2::<u64>::zeros((h, w));

        for r in 0..h {
            let mut row_sum = 0u64;
            for c in 0..w {
                row_sum += u64::from(raster.get(r, c));
                let above = if r > 0 { values[[r - 1, c]] } else { 0 };
                values[[r, c]] = row_sum + above;
            }
        }

        Self { values }
    }

    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    pub fn height(&self) -> usize {
        self.values.nrows()
    }

    /// Sum of pixels in the inclusive rectangle `[r0..=r1] x [c0..=c1]`
    /// via corner inclusion-exclusion. The rectangle must already be
    /// clamped to the image bounds; corners that would fall at a negative
    /// coordinate contribute 0.
    pub fn window_sum(&self, r0: usize, c0: usize, r1: usize, c1: usize) -> u64 {
        let a = self.values[[r1, c1]];
        let b = if r0 > 0 { self.values[[r0 - 1, c1]] } else { 0 };
        let c = if c0 > 0 { self.values[[r1, c0 - 1]] } else { 0 };
        let d = if r0 > 0 && c0 > 0 {
            self.values[[r0 - 1, c0 - 1]]
        } else {
            0
        };

        // Summed in this order the intermediate values never underflow.
        a + d - b - c
    }
}
