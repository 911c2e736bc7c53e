//! Owned RGBA8 pixel buffers.
//!
//! A [`PixelBuffer`] can only be built through validating constructors, so
//! every instance satisfies `data.len() == width * height * 4` with both
//! dimensions positive. Downstream stages rely on that and index freely.

use crate::result::{ImgCompareError, ImgCompareResult};
use image::RgbaImage;

/// Bytes per pixel (red, green, blue, alpha)
pub const CHANNELS: usize = 4;

/// Fully transparent black, used for canvas padding
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Decoded raster image with interleaved RGBA bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes.
    ///
    /// Dimensions are checked before the length, so a zero width is always
    /// reported as `InvalidDimensions` even when `data` is empty.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> ImgCompareResult<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(ImgCompareError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Copy caller-owned bytes with signed dimensions, as they arrive from a
    /// platform bridge. Non-positive values are `InvalidDimensions`.
    pub fn from_slice(pixels: &[u8], width: i32, height: i32) -> ImgCompareResult<Self> {
        let invalid = || ImgCompareError::InvalidDimensions {
            width: i64::from(width),
            height: i64::from(height),
        };
        let w = u32::try_from(width).map_err(|_| invalid())?;
        let h = u32::try_from(height).map_err(|_| invalid())?;
        let expected = byte_len(w, h)?;
        if pixels.len() != expected {
            return Err(ImgCompareError::InvalidBuffer {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width: w,
            height: h,
            data: pixels.to_vec(),
        })
    }

    /// Buffer of the given size with every pixel set to `rgba`
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> ImgCompareResult<Self> {
        let len = byte_len(width, height)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Fully transparent buffer of the given size
    pub fn transparent(width: u32, height: u32) -> ImgCompareResult<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Width in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// Raw interleaved RGBA bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its bytes
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// RGBA value at `(x, y)`, or `None` when out of bounds
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[i..i + CHANNELS]);
        Some(px)
    }

    /// Iterate pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(CHANNELS)
    }

    /// Convert to an `image` crate buffer
    #[must_use]
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width, self.height);
        img.copy_from_slice(&self.data);
        img
    }

    pub(crate) fn same_size(&self, other: &Self) -> ImgCompareResult<()> {
        if self.dimensions() == other.dimensions() {
            Ok(())
        } else {
            Err(ImgCompareError::DimensionMismatch {
                left_width: self.width,
                left_height: self.height,
                right_width: other.width,
                right_height: other.height,
            })
        }
    }

    pub(crate) fn from_parts_unchecked(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * CHANNELS);
        Self {
            width,
            height,
            data,
        }
    }
}

impl TryFrom<RgbaImage> for PixelBuffer {
    type Error = ImgCompareError;

    fn try_from(img: RgbaImage) -> ImgCompareResult<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }
}

/// Byte length for a `width x height` RGBA canvas
pub(crate) fn byte_len(width: u32, height: u32) -> ImgCompareResult<usize> {
    let invalid = || ImgCompareError::InvalidDimensions {
        width: i64::from(width),
        height: i64::from(height),
    };
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(invalid)
}
