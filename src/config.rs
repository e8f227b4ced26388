//! Configuration types for brightness analysis

use crate::analysis::LuminanceWeights;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Upper bound on concurrently spawned partition tasks
///
/// Larger split counts are clamped to this when the columns are partitioned;
/// the result does not depend on the partition count.
pub const MAX_PARALLELISM: usize = 1024;

/// Configuration for brightness analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Number of column partitions to sum concurrently (None or 1 = sequential)
    pub parallelism: Option<NonZeroUsize>,

    /// Luminance weighting applied to each pixel
    pub weights: LuminanceWeights,

    /// Check that partial results cover every pixel exactly once
    pub verify_coverage: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            parallelism: None,
            weights: LuminanceWeights::default(),
            verify_coverage: true,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new configuration builder
    ///
    /// # Examples
    ///
    /// ```rust
    /// use image_brightness::{AnalyzerConfig, LuminanceWeights};
    ///
    /// let config = AnalyzerConfig::builder()
    ///     .parallelism(4)
    ///     .weights(LuminanceWeights::Rec601)
    ///     .build();
    /// assert!(config.is_parallel());
    /// ```
    #[must_use]
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::default()
    }

    /// Whether this configuration requests the parallel path
    #[must_use]
    pub fn is_parallel(&self) -> bool {
        self.parallelism.is_some_and(|n| n.get() > 1)
    }
}

/// Builder for `AnalyzerConfig`
#[derive(Debug, Default)]
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Set the partition count; 0 and 1 both select the sequential path
    #[must_use]
    pub fn parallelism(mut self, splits: usize) -> Self {
        self.config.parallelism = NonZeroUsize::new(splits);
        self
    }

    /// Use one partition per available CPU
    #[must_use]
    pub fn parallelism_auto(mut self) -> Self {
        self.config.parallelism = std::thread::available_parallelism().ok();
        self
    }

    /// Set luminance weights
    #[must_use]
    pub fn weights(mut self, weights: LuminanceWeights) -> Self {
        self.config.weights = weights;
        self
    }

    /// Enable or disable the pixel-coverage check
    #[must_use]
    pub fn verify_coverage(mut self, enabled: bool) -> Self {
        self.config.verify_coverage = enabled;
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}
