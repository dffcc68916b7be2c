use ndarray::Array2;

use crate::error::{ReliefError, Result};

/// A single grayscale image plane.
/// Pixel values are f32 in [0.0, 1.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Original bit depth before conversion (8 or 16)
    pub original_bit_depth: u8,
}

impl Frame {
    pub fn new(data: Array2<f32>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Validated normal-map input: the red (x) and green (y) component planes.
///
/// Any further channels of the source image carry no surface orientation
/// and are dropped at load time.
#[derive(Clone, Debug)]
pub struct NormalMap {
    pub red: Frame,
    pub green: Frame,
}

impl NormalMap {
    /// Build a normal map from its component planes.
    ///
    /// Rejects zero-sized planes and planes of differing shape before any
    /// computation can run on them.
    pub fn new(red: Frame, green: Frame) -> Result<Self> {
        let (h, w) = red.data.dim();
        if h == 0 || w == 0 {
            return Err(ReliefError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        let (gh, gw) = green.data.dim();
        if (gh, gw) != (h, w) {
            return Err(ReliefError::ShapeMismatch {
                expected_width: w,
                expected_height: h,
                actual_width: gw,
                actual_height: gh,
            });
        }
        Ok(Self { red, green })
    }

    pub fn width(&self) -> usize {
        self.red.width()
    }

    pub fn height(&self) -> usize {
        self.red.height()
    }

    pub fn bit_depth(&self) -> u8 {
        self.red.original_bit_depth
    }
}
