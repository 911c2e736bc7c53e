//! Lossless PNG output for composite buffers.
//!
//! ## Example
//!
//! ```ignore
//! let writer = PngWriter::new()
//!     .with_output_dir("/tmp/out")
//!     .with_compression(CompressionLevel::Best);
//!
//! let path = writer.write(&composite)?;
//! ```

use crate::buffer::PixelBuffer;
use crate::result::{ImgCompareError, ImgCompareResult};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Default file name prefix
pub const DEFAULT_PREFIX: &str = "comparison";

/// PNG compression level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// Fast compression, larger files
    Fast,
    /// Default compression
    #[default]
    Default,
    /// Best compression, slowest
    Best,
}

impl CompressionLevel {
    fn to_png_compression(self) -> png::Compression {
        match self {
            Self::Fast => png::Compression::Fast,
            Self::Default => png::Compression::Balanced,
            Self::Best => png::Compression::High,
        }
    }
}

/// Default output location: `<system temp>/imgcompare`
#[must_use]
pub fn default_output_dir() -> PathBuf {
    std::env::temp_dir().join("imgcompare")
}

/// Writes buffers as PNG files with collision-free names
#[derive(Debug, Clone)]
pub struct PngWriter {
    output_dir: PathBuf,
    prefix: String,
    compression: CompressionLevel,
}

impl Default for PngWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PngWriter {
    /// Writer targeting the default output directory
    #[must_use]
    pub fn new() -> Self {
        Self {
            output_dir: default_output_dir(),
            prefix: DEFAULT_PREFIX.to_string(),
            compression: CompressionLevel::Default,
        }
    }

    /// Set the directory files are written to
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the file name prefix
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the compression level
    #[must_use]
    pub const fn with_compression(mut self, compression: CompressionLevel) -> Self {
        self.compression = compression;
        self
    }

    /// Get the output directory
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Get the compression level
    #[must_use]
    pub const fn compression(&self) -> CompressionLevel {
        self.compression
    }

    /// Encode a buffer to PNG bytes
    pub fn encode(&self, buffer: &PixelBuffer) -> ImgCompareResult<Vec<u8>> {
        let mut output = Vec::new();
        self.encode_into(buffer, &mut output)?;
        Ok(output)
    }

    /// Encode and write to a fresh file, returning its absolute path.
    ///
    /// The file is created with `create_new`, so an existing file is never
    /// replaced.
    pub fn write(&self, buffer: &PixelBuffer) -> ImgCompareResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self
            .output_dir
            .join(format!("{}-{}.png", self.prefix, Uuid::new_v4()));
        debug!(path = %path.display(), "creating output file");

        let file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        let mut out = BufWriter::new(file);
        let written = self
            .encode_into(buffer, &mut out)
            .and_then(|()| out.flush().map_err(ImgCompareError::from));
        if let Err(e) = written {
            drop(out);
            let _ = fs::remove_file(&path);
            return Err(e);
        }
        drop(out);

        let path = fs::canonicalize(&path)?;
        info!(
            path = %path.display(),
            width = buffer.width(),
            height = buffer.height(),
            "wrote comparison image"
        );
        Ok(path)
    }

    fn encode_into<W: Write>(&self, buffer: &PixelBuffer, sink: W) -> ImgCompareResult<()> {
        let mut encoder = png::Encoder::new(sink, buffer.width(), buffer.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(self.compression.to_png_compression());

        let mut writer = encoder.write_header().map_err(map_png_error)?;
        writer
            .write_image_data(buffer.as_bytes())
            .map_err(map_png_error)?;
        writer.finish().map_err(map_png_error)
    }
}

/// Keep I/O failures as `Io`; everything else is an encoder fault
fn map_png_error(e: png::EncodingError) -> ImgCompareError {
    match e {
        png::EncodingError::IoError(io) => ImgCompareError::Io(io),
        other => ImgCompareError::encode(other.to_string()),
    }
}
