use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::gradient::GradientField;

/// Whether the input normal map already tiles seamlessly.
///
/// The integrator assumes periodic boundaries, so a non-tileable input is
/// first mirrored into a periodic field twice the size (at the cost of
/// roughly 4x the working memory) and cropped back afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileMode {
    #[default]
    Seamless,
    NonSeamless,
}

/// Concatenate four mirrored copies of the gradient field so it wraps.
/// Output is twice the input size in both dimensions.
///
/// Mirroring reverses the sign of the derivative along the flipped axis:
/// the top-right quadrant negates grad_x, the bottom-left negates grad_y,
/// and the bottom-right (mirrored along both axes) negates both. The seams
/// of the doubled field are then gradient-continuous, which keeps the
/// periodic solve from warping the tile edges.
pub fn expand_mirrored(grad: &GradientField) -> GradientField {
    let (h, w) = grad.dim();
    let gx = grad.x();
    let gy = grad.y();

    let mut out_x = Array2::<f32>::zeros((2 * h, 2 * w));
    let mut out_y = Array2::<f32>::zeros((2 * h, 2 * w));

    for r in 0..h {
        for c in 0..w {
            let x = gx[[r, c]];
            let y = gy[[r, c]];
            let (mr, mc) = (2 * h - 1 - r, 2 * w - 1 - c);

            out_x[[r, c]] = x;
            out_x[[r, mc]] = -x;
            out_x[[mr, c]] = x;
            out_x[[mr, mc]] = -x;

            out_y[[r, c]] = y;
            out_y[[r, mc]] = y;
            out_y[[mr, c]] = -y;
            out_y[[mr, mc]] = -y;
        }
    }

    GradientField::new(out_x, out_y).expect("mirrored planes share one nonzero shape")
}
