use ndarray::Array2;

use crate::consts::CHANNEL_MIDPOINT;
use crate::error::{ReliefError, Result};
use crate::frame::NormalMap;

/// Surface-gradient field: per-pixel partial derivatives of the unknown
/// height along x (columns) and y (rows). Both planes always share one
/// shape; stages produce new fields rather than mutating in place.
#[derive(Clone, Debug)]
pub struct GradientField {
    x: Array2<f32>,
    y: Array2<f32>,
}

impl GradientField {
    pub fn new(x: Array2<f32>, y: Array2<f32>) -> Result<Self> {
        let (h, w) = x.dim();
        if h == 0 || w == 0 {
            return Err(ReliefError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        let (yh, yw) = y.dim();
        if (yh, yw) != (h, w) {
            return Err(ReliefError::ShapeMismatch {
                expected_width: w,
                expected_height: h,
                actual_width: yw,
                actual_height: yh,
            });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &Array2<f32> {
        &self.x
    }

    pub fn y(&self) -> &Array2<f32> {
        &self.y
    }

    /// (height, width) of both planes.
    pub fn dim(&self) -> (usize, usize) {
        self.x.dim()
    }
}

/// Decode a normal map into its implied gradient field.
///
/// Channel samples in [0,1] encode signed [-1,1] components, so each plane
/// maps through (v - 0.5) * 2. Affine and element-wise; mid-gray decodes to
/// a zero gradient.
pub fn normal_to_grad(map: &NormalMap) -> GradientField {
    let x = map.red.data.mapv(|v| (v - CHANNEL_MIDPOINT) * 2.0);
    let y = map.green.data.mapv(|v| (v - CHANNEL_MIDPOINT) * 2.0);
    GradientField { x, y }
}
