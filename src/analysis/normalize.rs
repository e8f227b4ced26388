//! Mapping of mean luminance onto a percentage scale

/// Lower bound of the output scale
pub const SCALE_MIN: f64 = 0.0;

/// Upper bound of the output scale
pub const SCALE_MAX: f64 = 100.0;

/// Largest value a 16-bit, alpha-premultiplied channel can hold
pub const MAX_CHANNEL_VALUE: f64 = u16::MAX as f64;

/// Rescale a mean luminance in `[0, MAX_CHANNEL_VALUE]` onto `[SCALE_MIN, SCALE_MAX]`, truncating
///
/// Non-finite or out-of-range means are pinned to the nearest scale bound.
#[must_use]
pub fn normalize(mean_luminance: f64) -> u8 {
    let scaled = (SCALE_MIN + (mean_luminance - 0.0) * (SCALE_MAX - SCALE_MIN))
        / (MAX_CHANNEL_VALUE - 0.0);
    if scaled.is_nan() {
        return SCALE_MIN as u8;
    }
    scaled.floor().clamp(SCALE_MIN, SCALE_MAX) as u8
}
