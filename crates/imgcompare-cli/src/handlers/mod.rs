//! Command handlers.
//!
//! The handlers are the calling layer: they decode image files into RGBA
//! buffers, hand those to the engine and render its results.

pub mod composite;
pub mod similarity;

use crate::error::{CliError, CliResult};
use imgcompare::PixelBuffer;
use std::path::Path;
use tracing::debug;

/// Decode an image file into an RGBA8 buffer
pub fn load_image(path: &Path) -> CliResult<PixelBuffer> {
    if !path.exists() {
        return Err(CliError::invalid_argument(format!(
            "Image file not found: {}",
            path.display()
        )));
    }

    let img = image::open(path).map_err(|e| CliError::decode(path, e.to_string()))?;
    let rgba = img.to_rgba8();
    debug!(path = %path.display(), width = rgba.width(), height = rgba.height(), "decoded image");
    Ok(PixelBuffer::try_from(rgba)?)
}
