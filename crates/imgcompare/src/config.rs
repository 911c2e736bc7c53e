//! Engine configuration

use crate::similarity::{DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOLERANCE};
use crate::writer::{default_output_dir, CompressionLevel, PngWriter, DEFAULT_PREFIX};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings a [`ComparisonEngine`](crate::ComparisonEngine) runs with.
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory composite images are written to
    pub output_dir: PathBuf,
    /// Prefix for generated file names
    pub file_prefix: String,
    /// PNG compression level
    pub compression: CompressionLevel,
    /// Per-channel tolerance used by similarity reports
    pub tolerance: u8,
    /// Score at or above which images count as similar
    pub similarity_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_prefix: DEFAULT_PREFIX.to_string(),
            compression: CompressionLevel::Default,
            tolerance: DEFAULT_TOLERANCE,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Create default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the file name prefix
    #[must_use]
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Set the compression level
    #[must_use]
    pub const fn with_compression(mut self, compression: CompressionLevel) -> Self {
        self.compression = compression;
        self
    }

    /// Set the report tolerance
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the similarity threshold
    #[must_use]
    pub const fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Writer configured from these settings
    #[must_use]
    pub fn writer(&self) -> PngWriter {
        PngWriter::new()
            .with_output_dir(&self.output_dir)
            .with_prefix(&self.file_prefix)
            .with_compression(self.compression)
    }
}
