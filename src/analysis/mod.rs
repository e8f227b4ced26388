//! Luminance partition/compute/reduce pipeline
//!
//! The image's columns are split into ranges, each range is summed
//! independently, and the partial sums are folded and normalized into a
//! percentage.

pub mod grid;
pub mod luminance;
pub mod normalize;
pub mod partition;
pub mod reducer;
pub mod segment;

pub use grid::PixelGrid;
pub use luminance::{
    relative_luminance_rec601, relative_luminance_rec709, ColorSample, LuminanceFn,
    LuminanceWeights,
};
pub use normalize::{normalize, MAX_CHANNEL_VALUE, SCALE_MAX, SCALE_MIN};
pub use partition::{partition, Partition};
pub use reducer::{reduce_parallel, reduce_sequential};
pub use segment::{sum_segment, SegmentResult};
