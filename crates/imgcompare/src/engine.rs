//! The two operations exposed to the calling layer.
//!
//! Both accept caller-owned RGBA bytes with signed dimensions, copy them into
//! owned [`PixelBuffer`]s, normalize onto a shared canvas and run the metric
//! or the compositor. Nothing is retained between calls.

use crate::buffer::PixelBuffer;
use crate::composite::{check_alpha, compose, CompositeImage, CompositeSpec, SplitAxis};
use crate::config::EngineConfig;
use crate::normalize::normalize;
use crate::result::ImgCompareResult;
use crate::similarity::{similarity, similarity_report, SimilarityReport};
use std::path::PathBuf;
use tracing::instrument;

/// Stateless comparison engine.
///
/// Holds only immutable configuration and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ComparisonEngine {
    config: EngineConfig,
}

impl ComparisonEngine {
    /// Create an engine with the given configuration
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Similarity of two raw RGBA images in [0, 1]
    #[instrument(level = "debug", skip(self, pixels_a, pixels_b))]
    pub fn compute_similarity(
        &self,
        pixels_a: &[u8],
        width_a: i32,
        height_a: i32,
        pixels_b: &[u8],
        width_b: i32,
        height_b: i32,
    ) -> ImgCompareResult<f64> {
        let a = PixelBuffer::from_slice(pixels_a, width_a, height_a)?;
        let b = PixelBuffer::from_slice(pixels_b, width_b, height_b)?;
        let (a, b) = normalize(&a, &b)?;
        similarity(&a, &b)
    }

    /// Write a comparison image of two raw RGBA images and return its path.
    ///
    /// `vertical_cut` selects a left/right split view; otherwise the images
    /// are overlay-blended with `alpha`. `alpha` must lie in [0, 1] either way.
    #[instrument(level = "debug", skip(self, pixels_a, pixels_b))]
    pub fn create_comparison_image(
        &self,
        pixels_a: &[u8],
        width_a: i32,
        height_a: i32,
        pixels_b: &[u8],
        width_b: i32,
        height_b: i32,
        alpha: f64,
        vertical_cut: bool,
    ) -> ImgCompareResult<PathBuf> {
        check_alpha(alpha)?;
        let a = PixelBuffer::from_slice(pixels_a, width_a, height_a)?;
        let b = PixelBuffer::from_slice(pixels_b, width_b, height_b)?;

        let spec = if vertical_cut {
            CompositeSpec {
                alpha,
                ..CompositeSpec::split(SplitAxis::Vertical)
            }
        } else {
            CompositeSpec::overlay(alpha)
        };

        Ok(self.composite(&a, &b, &spec)?.path)
    }

    /// Normalize and produce a full similarity report
    #[instrument(level = "debug", skip_all)]
    pub fn compare(&self, a: &PixelBuffer, b: &PixelBuffer) -> ImgCompareResult<SimilarityReport> {
        let (a, b) = normalize(a, b)?;
        similarity_report(&a, &b, self.config.tolerance)
    }

    /// Normalize, compose and write; the returned image carries its path
    #[instrument(level = "debug", skip(self, a, b))]
    pub fn composite(
        &self,
        a: &PixelBuffer,
        b: &PixelBuffer,
        spec: &CompositeSpec,
    ) -> ImgCompareResult<CompositeImage> {
        let (a, b) = normalize(a, b)?;
        let buffer = compose(&a, &b, spec)?;
        let path = self.config.writer().write(&buffer)?;
        Ok(CompositeImage::new(buffer, path))
    }
}

/// [`ComparisonEngine::compute_similarity`] with the default configuration
pub fn compute_similarity(
    pixels_a: &[u8],
    width_a: i32,
    height_a: i32,
    pixels_b: &[u8],
    width_b: i32,
    height_b: i32,
) -> ImgCompareResult<f64> {
    ComparisonEngine::default().compute_similarity(pixels_a, width_a, height_a, pixels_b, width_b, height_b)
}

/// [`ComparisonEngine::create_comparison_image`] with the default configuration
pub fn create_comparison_image(
    pixels_a: &[u8],
    width_a: i32,
    height_a: i32,
    pixels_b: &[u8],
    width_b: i32,
    height_b: i32,
    alpha: f64,
    vertical_cut: bool,
) -> ImgCompareResult<PathBuf> {
    ComparisonEngine::default().create_comparison_image(
        pixels_a,
        width_a,
        height_a,
        pixels_b,
        width_b,
        height_b,
        alpha,
        vertical_cut,
    )
}
