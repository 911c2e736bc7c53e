//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// imgcompare: score how alike two images are and render comparison images
#[derive(Parser, Debug)]
#[command(name = "imgcompare")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Engine configuration file (YAML)
    #[arg(long, global = true, env = "IMGCOMPARE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score the similarity of two images
    Similarity(SimilarityArgs),

    /// Render a blend or split-view comparison image
    Composite(CompositeArgs),
}

/// Output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

/// PNG compression level
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompressionArg {
    /// Fast compression
    Fast,
    /// Default compression
    Default,
    /// Best compression
    Best,
}

impl From<CompressionArg> for imgcompare::CompressionLevel {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Fast => Self::Fast,
            CompressionArg::Default => Self::Default,
            CompressionArg::Best => Self::Best,
        }
    }
}

/// Arguments for the similarity command
#[derive(Parser, Debug)]
pub struct SimilarityArgs {
    /// First image
    pub image_a: PathBuf,

    /// Second image
    pub image_b: PathBuf,

    /// Minimum score (0.0-1.0) for the images to count as similar
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Per-channel tolerance for the within-tolerance ratio
    #[arg(long)]
    pub tolerance: Option<u8>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the composite command
#[derive(Parser, Debug)]
pub struct CompositeArgs {
    /// First image
    pub image_a: PathBuf,

    /// Second image
    pub image_b: PathBuf,

    /// Blend factor (0.0 = first image, 1.0 = second image)
    #[arg(short, long, default_value = "0.5")]
    pub alpha: f64,

    /// Split view: left half from the first image, right half from the second
    #[arg(long, conflicts_with = "horizontal_cut")]
    pub vertical_cut: bool,

    /// Split view: top half from the first image, bottom half from the second
    #[arg(long)]
    pub horizontal_cut: bool,

    /// Directory to write the comparison image to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// PNG compression level
    #[arg(long, value_enum)]
    pub compression: Option<CompressionArg>,
}
