//! Canvas normalization.
//!
//! Two images of different sizes are placed on a shared canvas whose size is
//! the element-wise maximum of both. Each image is scaled uniformly (aspect
//! ratio kept) to the largest size that fits, anchored at the top-left
//! corner. Canvas area not covered by the scaled image stays fully
//! transparent; content is never stretched or edge-replicated into it.
//!
//! Resampling is separable. Per axis, growth uses bilinear interpolation
//! (`image`'s triangle filter) and shrinkage uses area averaging
//! (`fast_image_resize`'s box convolution).

use crate::buffer::{byte_len, PixelBuffer, CHANNELS};
use crate::result::{ImgCompareError, ImgCompareResult};
use fast_image_resize::{self as fir, PixelType, ResizeAlg, ResizeOptions};
use image::imageops::{self, FilterType};
use std::borrow::Cow;
use tracing::debug;

/// Bring two buffers onto a common canvas.
///
/// Equal-sized inputs are returned as copies. The outputs always share
/// dimensions and can be compared index by index.
pub fn normalize(a: &PixelBuffer, b: &PixelBuffer) -> ImgCompareResult<(PixelBuffer, PixelBuffer)> {
    if a.dimensions() == b.dimensions() {
        return Ok((a.clone(), b.clone()));
    }

    let target_w = a.width().max(b.width());
    let target_h = a.height().max(b.height());
    debug!(
        a_width = a.width(),
        a_height = a.height(),
        b_width = b.width(),
        b_height = b.height(),
        target_w,
        target_h,
        "normalizing onto common canvas"
    );

    Ok((
        fit_to_canvas(a, target_w, target_h)?,
        fit_to_canvas(b, target_w, target_h)?,
    ))
}

/// Resample a buffer to exactly `width x height`.
///
/// Each axis is handled independently, width first: bilinear (triangle
/// filter) when it grows, area averaging (box filter) when it shrinks,
/// untouched when equal.
pub fn resample(src: &PixelBuffer, width: u32, height: u32) -> ImgCompareResult<PixelBuffer> {
    if src.dimensions() == (width, height) {
        return Ok(src.clone());
    }
    byte_len(width, height)?;
    debug!(
        src_w = src.width(),
        src_h = src.height(),
        dst_w = width,
        dst_h = height,
        "resampling"
    );

    let mut current = Cow::Borrowed(src);
    if width != src.width() {
        current = Cow::Owned(resize_axis(&current, width, src.height())?);
    }
    if height != src.height() {
        current = Cow::Owned(resize_axis(&current, width, height)?);
    }
    Ok(current.into_owned())
}

/// Resize along the one axis whose length changes
fn resize_axis(src: &PixelBuffer, width: u32, height: u32) -> ImgCompareResult<PixelBuffer> {
    if width > src.width() || height > src.height() {
        bilinear(src, width, height)
    } else {
        area_average(src, width, height)
    }
}

fn bilinear(src: &PixelBuffer, width: u32, height: u32) -> ImgCompareResult<PixelBuffer> {
    let resized = imageops::resize(&src.to_rgba_image(), width, height, FilterType::Triangle);
    PixelBuffer::try_from(resized)
}

fn area_average(src: &PixelBuffer, width: u32, height: u32) -> ImgCompareResult<PixelBuffer> {
    let src_image = fir::images::Image::from_vec_u8(
        src.width(),
        src.height(),
        src.as_bytes().to_vec(),
        PixelType::U8x4,
    )
    .map_err(|e| ImgCompareError::resample(e.to_string()))?;
    let mut dst_image = fir::images::Image::new(width, height, PixelType::U8x4);

    // Straight alpha: colour and alpha are averaged independently
    let options = ResizeOptions::new()
        .resize_alg(ResizeAlg::Convolution(fir::FilterType::Box))
        .use_alpha(false);
    let mut resizer = fir::Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| ImgCompareError::resample(e.to_string()))?;

    PixelBuffer::new(width, height, dst_image.into_vec())
}

/// Scale `src` uniformly into the canvas and pad the rest with transparency
fn fit_to_canvas(src: &PixelBuffer, canvas_w: u32, canvas_h: u32) -> ImgCompareResult<PixelBuffer> {
    if src.dimensions() == (canvas_w, canvas_h) {
        return Ok(src.clone());
    }

    let (fit_w, fit_h) = fitted_size(src.width(), src.height(), canvas_w, canvas_h);
    let scaled = resample(src, fit_w, fit_h)?;
    if (fit_w, fit_h) == (canvas_w, canvas_h) {
        return Ok(scaled);
    }

    debug!(fit_w, fit_h, canvas_w, canvas_h, "padding with transparent pixels");
    let mut canvas = PixelBuffer::transparent(canvas_w, canvas_h)?.into_raw();
    let src_row = fit_w as usize * CHANNELS;
    let dst_row = canvas_w as usize * CHANNELS;
    for (y, row) in scaled.as_bytes().chunks_exact(src_row).enumerate() {
        canvas[y * dst_row..y * dst_row + src_row].copy_from_slice(row);
    }

    Ok(PixelBuffer::from_parts_unchecked(canvas_w, canvas_h, canvas))
}

/// Largest aspect-preserving size of `width x height` within the canvas
fn fitted_size(width: u32, height: u32, canvas_w: u32, canvas_h: u32) -> (u32, u32) {
    let scale = (f64::from(canvas_w) / f64::from(width)).min(f64::from(canvas_h) / f64::from(height));
    let fit = |len: u32, max: u32| ((f64::from(len) * scale).round() as u32).clamp(1, max);
    (fit(width, canvas_w), fit(height, canvas_h))
}
