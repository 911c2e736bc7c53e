//! Similarity scoring over normalized buffers.
//!
//! The score is one minus the mean RGB distance of every pixel that is
//! visible in at least one image, scaled to [0, 1]. Alpha only decides
//! whether a pixel takes part; pixels transparent in both images are skipped.

use crate::buffer::PixelBuffer;
use crate::result::ImgCompareResult;
use serde::{Deserialize, Serialize};

/// Largest possible `channel_diff` for 8-bit channels
pub const MAX_CHANNEL_DIFF: u32 = 255 * 3;

/// Per-channel difference below which a pixel counts as matching
pub const DEFAULT_TOLERANCE: u8 = 10;

/// Score at or above which two images are considered the same picture
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.90;

/// Detailed outcome of comparing two images
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    /// Similarity score in [0.0, 1.0]
    pub score: f64,
    /// Pixels visible in at least one image
    pub compared_pixels: usize,
    /// Pixels on the canvas
    pub total_pixels: usize,
    /// Compared pixels with any RGB difference
    pub differing_pixels: usize,
    /// Largest `|dr| + |dg| + |db|` seen (0-765)
    pub max_channel_diff: u32,
    /// Fraction of compared pixels whose every RGB channel is within tolerance
    pub within_tolerance_ratio: f64,
}

impl SimilarityReport {
    /// Whether the score reaches `threshold`
    #[must_use]
    pub fn is_similar(&self, threshold: f64) -> bool {
        self.score >= threshold
    }

    /// Check if images are pixel-identical in RGB over the compared area
    #[must_use]
    pub const fn is_identical(&self) -> bool {
        self.differing_pixels == 0
    }

    /// Score as a percentage (0.0-100.0)
    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.score * 100.0
    }
}

/// Similarity score of two equal-sized buffers.
///
/// Fails with `DimensionMismatch` when the buffers were not normalized.
pub fn similarity(a: &PixelBuffer, b: &PixelBuffer) -> ImgCompareResult<f64> {
    a.same_size(b)?;

    let mut diff_sum: u64 = 0;
    let mut weight_sum: u64 = 0;
    for (pa, pb) in a.pixels().zip(b.pixels()) {
        if !visible(pa, pb) {
            continue;
        }
        diff_sum += u64::from(channel_diff(pa, pb));
        weight_sum += 1;
    }

    Ok(score(diff_sum, weight_sum))
}

/// Score plus diagnostic counters, in one pass.
///
/// `tolerance` is the per-channel absolute difference below which a compared
/// pixel counts toward `within_tolerance_ratio`.
pub fn similarity_report(
    a: &PixelBuffer,
    b: &PixelBuffer,
    tolerance: u8,
) -> ImgCompareResult<SimilarityReport> {
    a.same_size(b)?;

    let mut diff_sum: u64 = 0;
    let mut compared: usize = 0;
    let mut differing: usize = 0;
    let mut within: usize = 0;
    let mut max_diff: u32 = 0;

    for (pa, pb) in a.pixels().zip(b.pixels()) {
        if !visible(pa, pb) {
            continue;
        }
        compared += 1;
        let diff = channel_diff(pa, pb);
        diff_sum += u64::from(diff);
        max_diff = max_diff.max(diff);
        if diff > 0 {
            differing += 1;
        }
        if pa[..3]
            .iter()
            .zip(&pb[..3])
            .all(|(&x, &y)| x.abs_diff(y) < tolerance)
        {
            within += 1;
        }
    }

    let within_tolerance_ratio = if compared > 0 {
        within as f64 / compared as f64
    } else {
        1.0
    };

    Ok(SimilarityReport {
        score: score(diff_sum, compared as u64),
        compared_pixels: compared,
        total_pixels: a.pixel_count(),
        differing_pixels: differing,
        max_channel_diff: max_diff,
        within_tolerance_ratio,
    })
}

/// Sum of absolute RGB channel differences; alpha is ignored
fn channel_diff(a: &[u8], b: &[u8]) -> u32 {
    u32::from(a[0].abs_diff(b[0])) + u32::from(a[1].abs_diff(b[1])) + u32::from(a[2].abs_diff(b[2]))
}

/// A pixel takes part unless it is fully transparent in both images
fn visible(a: &[u8], b: &[u8]) -> bool {
    a[3] > 0 || b[3] > 0
}

fn score(diff_sum: u64, weight_sum: u64) -> f64 {
    if weight_sum == 0 {
        return 1.0;
    }
    let mean = diff_sum as f64 / (f64::from(MAX_CHANNEL_DIFF) * weight_sum as f64);
    (1.0 - mean).clamp(0.0, 1.0)
}
