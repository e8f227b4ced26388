//! Configuration conversion utilities for CLI arguments

use crate::analysis::LuminanceWeights;
use crate::cli::main_impl::{Cli, CliWeights};
use crate::config::AnalyzerConfig;
use anyhow::{Context, Result};

/// Convert CLI arguments to an `AnalyzerConfig`
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    /// Build AnalyzerConfig from CLI arguments
    pub(crate) fn from_cli(cli: &Cli) -> Result<AnalyzerConfig> {
        Self::validate_cli(cli)?;

        let weights = match cli.weights {
            CliWeights::Rec709 => LuminanceWeights::Rec709,
            CliWeights::Rec601 => LuminanceWeights::Rec601,
        };

        let builder = AnalyzerConfig::builder().weights(weights);
        let builder = if cli.splits == 0 {
            builder.parallelism_auto()
        } else {
            builder.parallelism(cli.splits)
        };

        Ok(builder.build())
    }

    /// Validate CLI arguments for consistency
    pub(crate) fn validate_cli(cli: &Cli) -> Result<()> {
        if let Some(pattern) = &cli.pattern {
            glob::Pattern::new(pattern)
                .with_context(|| format!("Invalid --pattern: {}", pattern))?;
        }

        Ok(())
    }
}
