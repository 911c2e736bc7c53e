//! imgcompare: pixel-level image comparison
//!
//! Scores the visual similarity of two RGBA images and renders composites
//! (alpha blend or split view) that make their differences visible.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌────────────┐    ┌──────────────┐
//! │ PixelBuffer  │───►│ normalize  │───►│ similarity   │──► f64 / report
//! │ (A, B)       │    │ (canvas)   │    ├──────────────┤
//! └──────────────┘    └────────────┘    │ compose      │──► PngWriter ──► path
//!                                       └──────────────┘
//! ```
//!
//! Every call is synchronous and self-contained. Run it off any UI thread.

#![warn(missing_docs)]

mod buffer;
mod composite;
mod config;
mod engine;
mod normalize;
mod result;
mod similarity;
mod writer;

pub use buffer::{PixelBuffer, CHANNELS, TRANSPARENT};
pub use composite::{compose, CompositeImage, CompositeMode, CompositeSpec, SplitAxis};
pub use config::EngineConfig;
pub use engine::{compute_similarity, create_comparison_image, ComparisonEngine};
pub use normalize::{normalize, resample};
pub use result::{ImgCompareError, ImgCompareResult};
pub use similarity::{
    similarity, similarity_report, SimilarityReport, DEFAULT_SIMILARITY_THRESHOLD,
    DEFAULT_TOLERANCE, MAX_CHANNEL_DIFF,
};
pub use writer::{default_output_dir, CompressionLevel, PngWriter, DEFAULT_PREFIX};
