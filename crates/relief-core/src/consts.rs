/// Minimum pixel count (h*w) to use row-level Rayon parallelism in the
/// 2D transform passes.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Regularizer added to the frequency-domain denominator so the division
/// stays finite near the zero-frequency singularity.
pub const DENOMINATOR_EPSILON: f64 = 1e-16;

/// Height-field range below which normalization treats the field as flat.
pub const FLAT_RANGE_EPSILON: f64 = 1e-10;

/// Constant value of the normalized output for a flat height field.
pub const FLAT_FIELD_VALUE: f32 = 0.5;

/// Offset applied when decoding a normal-map channel: [0,1] samples map to
/// signed [-1,1] components via (v - 0.5) * 2.
pub const CHANNEL_MIDPOINT: f32 = 0.5;
