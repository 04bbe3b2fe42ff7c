use ndarray::Array2;

use crate::error::{Result, UmbralError};

/// An 8-bit grayscale image.
///
/// Pixel data is row-major, shape = (height, width). The raster is the
/// validation boundary for decoded input: once constructed it is
/// dimensionally consistent and treated as read-only by the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    data: Array2<u8>,
}

impl Raster {
    /// Build a raster from a decoded `(width, height, pixels)` triple.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(UmbralError::InvalidDimensions { width, height });
        }
        let expected = width * height;
        if pixels.len() != expected {
            return Err(UmbralError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        let data = Array2::from_shape_vec((height, width), pixels)
            .expect("buffer length was validated against the dimensions");
        Ok(Self { data })
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[[row, col]]
    }

    pub fn data(&self) -> &Array2<u8> {
        &self.data
    }

    /// Row-major pixel slice, length = width * height.
    pub fn as_slice(&self) -> &[u8] {
        self.data
            .as_slice()
            .expect("raster storage is contiguous row-major")
    }

    /// Consume the raster, returning the row-major pixel buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data.into_raw_vec_and_offset().0
    }
}
