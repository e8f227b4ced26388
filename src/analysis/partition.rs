//! Column-range partitioning of an image's horizontal extent

use std::num::NonZeroUsize;

/// A half-open column range `[x_min, x_max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partition {
    pub x_min: u32,
    pub x_max: u32,
}

impl Partition {
    /// Number of columns covered
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.x_max - self.x_min
    }

    /// Whether the range covers no columns
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x_min == self.x_max
    }
}

/// Split `[0, width)` into at most `split_count` contiguous ranges
///
/// Segments of `ceil(width / split_count)` columns are carved from the right
/// edge; the leftmost one is clamped at 0 and absorbs the remainder. The
/// ranges are returned right-to-left and tile `[0, width)` exactly.
#[must_use]
pub fn partition(width: u32, split_count: NonZeroUsize) -> Vec<Partition> {
    // split counts past u32::MAX behave like one column per segment
    let splits = u32::try_from(split_count.get()).unwrap_or(u32::MAX);
    let segment_length = width.div_ceil(splits);

    let mut partitions = Vec::with_capacity(split_count.get().min(width as usize));
    let mut ceiling = width;
    while ceiling > 0 {
        let x_min = ceiling.saturating_sub(segment_length);
        partitions.push(Partition { x_min, x_max: ceiling });
        ceiling = x_min;
    }
    partitions
}
