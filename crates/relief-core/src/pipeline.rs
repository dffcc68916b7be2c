use ndarray::s;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::frame::{Frame, NormalMap};
use crate::gradient::normal_to_grad;
use crate::integrate::frankot_chellappa;
use crate::tiling::{expand_mirrored, TileMode};

/// Settings for a normal-to-height conversion.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HeightConfig {
    #[serde(default)]
    pub tile_mode: TileMode,
}

/// Convert a normal map into a normalized height frame.
///
/// Extracts the gradient field, optionally expands it into a periodic
/// field (non-seamless inputs), integrates, and crops back to the input
/// size. The output is in [0,1] and keeps the source bit depth for
/// quantization on save.
pub fn normal_to_height(map: &NormalMap, config: &HeightConfig) -> Frame {
    let h = map.height();
    let w = map.width();
    info!(width = w, height = h, mode = ?config.tile_mode, "Extracting gradients");
    let grad = normal_to_grad(map);

    let grad = match config.tile_mode {
        TileMode::Seamless => grad,
        TileMode::NonSeamless => {
            info!("Expanding gradients into a wrapping field");
            expand_mirrored(&grad)
        }
    };

    info!("Integrating gradients");
    let height = frankot_chellappa(&grad, true);

    let height = if config.tile_mode == TileMode::NonSeamless {
        // Only the top-left block of the doubled solve is valid.
        height.slice(s![..h, ..w]).to_owned()
    } else {
        height
    };

    Frame::new(height, map.bit_depth())
}
