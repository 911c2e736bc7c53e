//! Composite command handler.

use super::load_image;
use crate::commands::CompositeArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use imgcompare::{ComparisonEngine, CompositeSpec, PixelBuffer, SplitAxis};
use std::path::PathBuf;

/// Execute the composite command and print the written path
pub fn execute(config: &CliConfig, args: &CompositeArgs) -> CliResult<PathBuf> {
    let mut engine_config = config.engine.clone();
    if let Some(ref dir) = args.output_dir {
        engine_config.output_dir.clone_from(dir);
    }
    if let Some(compression) = args.compression {
        engine_config.compression = compression.into();
    }
    let engine = ComparisonEngine::new(engine_config);

    let a = load_image(&args.image_a)?;
    let b = load_image(&args.image_b)?;

    let path = if args.horizontal_cut {
        let spec = CompositeSpec {
            alpha: args.alpha,
            ..CompositeSpec::split(SplitAxis::Horizontal)
        };
        spec.validate()?;
        engine.composite(&a, &b, &spec)?.path
    } else {
        let (wa, ha) = signed_dimensions(&a)?;
        let (wb, hb) = signed_dimensions(&b)?;
        engine.create_comparison_image(
            a.as_bytes(),
            wa,
            ha,
            b.as_bytes(),
            wb,
            hb,
            args.alpha,
            args.vertical_cut,
        )?
    };

    if !config.verbosity.is_quiet() {
        println!("{}", path.display());
    }
    Ok(path)
}

fn signed_dimensions(buf: &PixelBuffer) -> CliResult<(i32, i32)> {
    let convert = |v: u32| {
        i32::try_from(v).map_err(|_| {
            CliError::invalid_argument(format!(
                "image too large: {}x{}",
                buf.width(),
                buf.height()
            ))
        })
    };
    Ok((convert(buf.width())?, convert(buf.height())?))
}
