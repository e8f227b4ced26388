//! Brightness analyzer
//!
//! `BrightnessAnalyzer` wires the partitioner, the reducer and the normalizer
//! together according to an `AnalyzerConfig`. Both the free functions in the
//! crate root and the CLI go through it.

use crate::{
    analysis::{
        normalize, partition, reduce_parallel, reduce_sequential, LuminanceWeights, PixelGrid,
        SegmentResult,
    },
    config::{AnalyzerConfig, MAX_PARALLELISM},
    error::{BrightnessError, Result},
};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Outcome of one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrightnessReport {
    /// Normalized brightness, 0-100
    pub percentage: u8,
    /// Mean luminance on the 16-bit channel scale (0 for empty images)
    pub mean_luminance: f64,
    /// Pixels that contributed
    pub pixel_count: u64,
    /// Column partitions summed (1 for the sequential path, 0 for empty images)
    pub segments: usize,
    /// Weighting used
    pub weights: LuminanceWeights,
}

/// Computes brightness percentages for decoded images
#[derive(Debug, Clone, Default)]
pub struct BrightnessAnalyzer {
    config: AnalyzerConfig,
}

impl BrightnessAnalyzer {
    /// Create an analyzer from a configuration
    #[must_use]
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze on the calling thread, ignoring the configured parallelism
    ///
    /// # Errors
    /// - `PixelCountMismatch` if coverage verification is enabled and fails
    #[instrument(level = "debug", skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn analyze_sequential<I>(&self, image: &I) -> Result<BrightnessReport>
    where
        I: PixelGrid + ?Sized,
    {
        let total = reduce_sequential(image, self.config.weights.function())?;
        let segments = usize::from(image.width() > 0);
        self.finish(image.pixel_count(), total, segments)
    }

    /// Analyze with the configured parallelism
    ///
    /// Sequential when parallelism is unset or 1, otherwise one blocking task
    /// per column partition.
    ///
    /// # Errors
    /// - The first error raised by any partition task
    /// - `PixelCountMismatch` if coverage verification is enabled and fails
    pub async fn analyze<I>(&self, image: Arc<I>) -> Result<BrightnessReport>
    where
        I: PixelGrid + ?Sized + 'static,
    {
        match self.config.parallelism {
            Some(splits) if splits.get() > 1 => self.analyze_parallel(image, splits).await,
            _ => self.analyze_sequential(&*image),
        }
    }

    /// Analyze with an explicit partition count, overriding the configuration
    ///
    /// Counts above `MAX_PARALLELISM` are clamped; any count yields the same
    /// percentage as the sequential path.
    ///
    /// # Errors
    /// - The first error raised by any partition task
    /// - `PixelCountMismatch` if coverage verification is enabled and fails
    #[instrument(level = "debug", skip(self, image), fields(width = image.width(), height = image.height()))]
    pub async fn analyze_parallel<I>(
        &self,
        image: Arc<I>,
        splits: NonZeroUsize,
    ) -> Result<BrightnessReport>
    where
        I: PixelGrid + ?Sized + 'static,
    {
        let width = image.width();
        let fan_out = NonZeroUsize::new(splits.get().min(MAX_PARALLELISM)).unwrap_or(splits);
        let partitions = partition(width, fan_out);
        debug!(
            ceiling = width,
            segment_length = partitions.first().map_or(0, |p| p.len()),
            segments = partitions.len(),
            "Partitioned image columns"
        );

        let expected = image.pixel_count();
        let total = reduce_parallel(image, &partitions, self.config.weights.function()).await?;
        self.finish(expected, total, partitions.len())
    }

    /// Analyze and return only the percentage
    ///
    /// # Errors
    /// - See [`BrightnessAnalyzer::analyze`]
    pub async fn analyze_percentage<I>(&self, image: Arc<I>) -> Result<u8>
    where
        I: PixelGrid + ?Sized + 'static,
    {
        Ok(self.analyze(image).await?.percentage)
    }

    fn finish(&self, expected: u64, total: SegmentResult, segments: usize) -> Result<BrightnessReport> {
        if self.config.verify_coverage && total.pixel_count != expected {
            return Err(BrightnessError::PixelCountMismatch {
                expected,
                actual: total.pixel_count,
            });
        }

        let (percentage, mean_luminance) = match total.mean() {
            Some(mean) => (normalize(mean), mean),
            None => (0, 0.0),
        };
        debug!(
            percentage,
            pixel_count = total.pixel_count,
            segments,
            "Brightness analysis complete"
        );

        Ok(BrightnessReport {
            percentage,
            mean_luminance,
            pixel_count: total.pixel_count,
            segments,
            weights: self.config.weights,
        })
    }
}
