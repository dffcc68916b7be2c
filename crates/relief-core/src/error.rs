use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReliefError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Normal map needs at least two color channels, got {channels}")]
    ChannelCount { channels: usize },

    #[error("Plane shape mismatch: expected {expected_height}x{expected_width}, got {actual_height}x{actual_width}")]
    ShapeMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ReliefError>;
