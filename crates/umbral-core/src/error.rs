use thiserror::Error;

#[derive(Error, Debug)]
pub enum UmbralError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Buffer length {actual} does not match expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Window size {0} must be odd and greater than 1")]
    InvalidWindowSize(usize),

    #[error("Collective mismatch: {0}")]
    CollectiveMismatch(String),
}

pub type Result<T> = std::result::Result<T, UmbralError>;
