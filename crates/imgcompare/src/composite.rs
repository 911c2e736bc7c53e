//! Composite images: linear overlay blend or split view.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::result::{ImgCompareError, ImgCompareResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the two sources are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompositeMode {
    /// `alpha * B + (1 - alpha) * A` on every channel
    #[default]
    OverlayBlend,
    /// First half from A, second half from B
    SplitView,
}

/// Where a split view is cut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplitAxis {
    /// Left (A) / right (B)
    #[default]
    Vertical,
    /// Top (A) / bottom (B)
    Horizontal,
}

/// Blend parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeSpec {
    /// Blend factor in [0, 1]; ignored by `SplitView`
    pub alpha: f64,
    /// Composite mode
    pub mode: CompositeMode,
    /// Split direction; only read by `SplitView`
    pub split_axis: SplitAxis,
}

impl Default for CompositeSpec {
    fn default() -> Self {
        Self::overlay(0.5)
    }
}

impl CompositeSpec {
    /// Overlay blend with the given factor
    #[must_use]
    pub const fn overlay(alpha: f64) -> Self {
        Self {
            alpha,
            mode: CompositeMode::OverlayBlend,
            split_axis: SplitAxis::Vertical,
        }
    }

    /// Split view along `axis`
    #[must_use]
    pub const fn split(axis: SplitAxis) -> Self {
        Self {
            alpha: 0.5,
            mode: CompositeMode::SplitView,
            split_axis: axis,
        }
    }

    /// Fail with `InvalidAlpha` unless `alpha` is a finite value in [0, 1]
    pub fn validate(&self) -> ImgCompareResult<()> {
        check_alpha(self.alpha)
    }
}

/// A composite buffer and the file it was written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeImage {
    /// Composite pixels
    pub buffer: PixelBuffer,
    /// Absolute path of the written PNG
    pub path: PathBuf,
}

impl CompositeImage {
    /// Pair a composite with its output path
    #[must_use]
    pub const fn new(buffer: PixelBuffer, path: PathBuf) -> Self {
        Self { buffer, path }
    }
}

pub(crate) fn check_alpha(alpha: f64) -> ImgCompareResult<()> {
    if (0.0..=1.0).contains(&alpha) {
        Ok(())
    } else {
        Err(ImgCompareError::InvalidAlpha { alpha })
    }
}

/// Build a composite of two equal-sized buffers.
///
/// Neither input is modified; the result has their dimensions.
pub fn compose(a: &PixelBuffer, b: &PixelBuffer, spec: &CompositeSpec) -> ImgCompareResult<PixelBuffer> {
    a.same_size(b)?;
    match spec.mode {
        CompositeMode::OverlayBlend => {
            spec.validate()?;
            Ok(overlay(a, b, spec.alpha))
        }
        CompositeMode::SplitView => Ok(split(a, b, spec.split_axis)),
    }
}

fn overlay(a: &PixelBuffer, b: &PixelBuffer, alpha: f64) -> PixelBuffer {
    let data = a
        .as_bytes()
        .iter()
        .zip(b.as_bytes())
        .map(|(&ca, &cb)| blend_channel(ca, cb, alpha))
        .collect();
    PixelBuffer::from_parts_unchecked(a.width(), a.height(), data)
}

fn split(a: &PixelBuffer, b: &PixelBuffer, axis: SplitAxis) -> PixelBuffer {
    let (width, height) = (a.width() as usize, a.height() as usize);
    let row_bytes = width * CHANNELS;
    let mut data = Vec::with_capacity(a.as_bytes().len());

    match axis {
        SplitAxis::Vertical => {
            let cut = (width / 2) * CHANNELS;
            for (ra, rb) in a
                .as_bytes()
                .chunks_exact(row_bytes)
                .zip(b.as_bytes().chunks_exact(row_bytes))
            {
                data.extend_from_slice(&ra[..cut]);
                data.extend_from_slice(&rb[cut..]);
            }
        }
        SplitAxis::Horizontal => {
            let cut = (height / 2) * row_bytes;
            data.extend_from_slice(&a.as_bytes()[..cut]);
            data.extend_from_slice(&b.as_bytes()[cut..]);
        }
    }

    PixelBuffer::from_parts_unchecked(a.width(), a.height(), data)
}

/// Linear interpolation of one channel, rounded to nearest
fn blend_channel(base: u8, overlay: u8, alpha: f64) -> u8 {
    let result = f64::from(base).mul_add(1.0 - alpha, f64::from(overlay) * alpha);
    result.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> PixelBuffer {
        PixelBuffer::filled(w, h, rgba).unwrap()
    }

    fn gradient(w: u32, h: u32, seed: u8) -> PixelBuffer {
        let data = (0..w * h * 4)
            .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
            .collect();
        PixelBuffer::new(w, h, data).unwrap()
    }

    #[test]
    fn test_overlay_endpoints() {
        let a = gradient(3, 2, 1);
        let b = gradient(3, 2, 77);
        assert_eq!(compose(&a, &b, &CompositeSpec::overlay(0.0)).unwrap(), a);
        assert_eq!(compose(&a, &b, &CompositeSpec::overlay(1.0)).unwrap(), b);
    }

    #[test]
    fn test_overlay_midpoint() {
        let out = compose(&solid(1, 1, RED), &solid(1, 1, BLUE), &CompositeSpec::overlay(0.5)).unwrap();
        // 127.5 rounds away from zero
        assert_eq!(out.pixel(0, 0), Some([128, 0, 128, 255]));
    }

    #[test]
    fn test_overlay_blends_alpha_channel() {
        let a = solid(1, 1, [0, 0, 0, 0]);
        let b = solid(1, 1, [0, 0, 0, 200]);
        let out = compose(&a, &b, &CompositeSpec::overlay(0.25)).unwrap();
        assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 50]));
    }

    #[test]
    fn test_invalid_alpha() {
        let a = solid(1, 1, RED);
        for alpha in [1.5, -0.1, f64::NAN, f64::INFINITY] {
            let err = compose(&a, &a, &CompositeSpec::overlay(alpha)).unwrap_err();
            assert!(matches!(err, ImgCompareError::InvalidAlpha { .. }));
        }
    }

    #[test]
    fn test_split_ignores_alpha() {
        let a = solid(2, 2, RED);
        let spec = CompositeSpec {
            alpha: 7.0,
            ..CompositeSpec::split(SplitAxis::Vertical)
        };
        assert!(compose(&a, &a, &spec).is_ok());
    }

    #[test]
    fn test_vertical_split_remainder_goes_right() {
        let out = compose(&solid(5, 2, RED), &solid(5, 2, BLUE), &CompositeSpec::split(SplitAxis::Vertical)).unwrap();
        for y in 0..2 {
            assert_eq!(out.pixel(0, y), Some(RED));
            assert_eq!(out.pixel(1, y), Some(RED));
            assert_eq!(out.pixel(2, y), Some(BLUE));
            assert_eq!(out.pixel(4, y), Some(BLUE));
        }
    }

    #[test]
    fn test_horizontal_split_remainder_goes_bottom() {
        let out = compose(&solid(2, 3, RED), &solid(2, 3, BLUE), &CompositeSpec::split(SplitAxis::Horizontal)).unwrap();
        assert_eq!(out.pixel(1, 0), Some(RED));
        assert_eq!(out.pixel(0, 1), Some(BLUE));
        assert_eq!(out.pixel(1, 2), Some(BLUE));
    }

    #[test]
    fn test_split_single_column_is_all_b() {
        let out = compose(&solid(1, 1, RED), &solid(1, 1, BLUE), &CompositeSpec::split(SplitAxis::Vertical)).unwrap();
        assert_eq!(out.pixel(0, 0), Some(BLUE));
    }

    #[test]
    fn test_split_copies_pixels_unmodified() {
        let a = gradient(4, 3, 5);
        let b = gradient(4, 3, 90);
        let out = compose(&a, &b, &CompositeSpec::split(SplitAxis::Vertical)).unwrap();
        for y in 0..3 {
            assert_eq!(out.pixel(1, y), a.pixel(1, y));
            assert_eq!(out.pixel(2, y), b.pixel(2, y));
        }
    }

    #[test]
    fn test_mismatched_sizes_rejected() {
        let err = compose(&solid(1, 2, RED), &solid(2, 1, RED), &CompositeSpec::overlay(0.5)).unwrap_err();
        assert!(matches!(err, ImgCompareError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_composite_image_path() {
        let img = CompositeImage::new(solid(1, 1, RED), PathBuf::from("/tmp/x.png"));
        assert_eq!(img.path, PathBuf::from("/tmp/x.png"));
        assert_eq!(img.buffer.dimensions(), (1, 1));
    }

    #[test]
    fn test_blend_channel() {
        assert_eq!(blend_channel(0, 255, 0.0), 0);
        assert_eq!(blend_channel(0, 255, 1.0), 255);
        assert_eq!(blend_channel(100, 200, 0.5), 150);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn pair() -> impl Strategy<Value = (PixelBuffer, PixelBuffer)> {
            (1u32..8, 1u32..8).prop_flat_map(|(w, h)| {
                let len = (w * h * 4) as usize;
                (
                    proptest::collection::vec(any::<u8>(), len),
                    proptest::collection::vec(any::<u8>(), len),
                )
                    .prop_map(move |(da, db)| {
                        (
                            PixelBuffer::new(w, h, da).unwrap(),
                            PixelBuffer::new(w, h, db).unwrap(),
                        )
                    })
            })
        }

        proptest! {
            #[test]
            fn prop_blend_endpoints_exact((a, b) in pair()) {
                prop_assert_eq!(compose(&a, &b, &CompositeSpec::overlay(0.0)).unwrap(), a.clone());
                prop_assert_eq!(compose(&a, &b, &CompositeSpec::overlay(1.0)).unwrap(), b);
            }

            #[test]
            fn prop_compose_idempotent((a, b) in pair(), alpha in 0.0f64..=1.0) {
                let spec = CompositeSpec::overlay(alpha);
                prop_assert_eq!(compose(&a, &b, &spec).unwrap(), compose(&a, &b, &spec).unwrap());
            }

            #[test]
            fn prop_output_keeps_dimensions((a, b) in pair(), vertical in any::<bool>()) {
                let axis = if vertical { SplitAxis::Vertical } else { SplitAxis::Horizontal };
                let out = compose(&a, &b, &CompositeSpec::split(axis)).unwrap();
                prop_assert_eq!(out.dimensions(), a.dimensions());
            }
        }
    }
}
