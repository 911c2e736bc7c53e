//! imgcompare CLI: compare two images
//!
//! ## Usage
//!
//! ```bash
//! imgcompare similarity a.png b.png              # Score, exit 1 below 90%
//! imgcompare similarity a.png b.png -t 0.5 -f json
//! imgcompare composite a.png b.png --alpha 0.3   # Overlay blend
//! imgcompare composite a.png b.png --vertical-cut
//! ```

use clap::Parser;
use imgcompare_cli::{
    handlers, load_engine_config, logging, Cli, CliConfig, CliResult, Commands, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    logging::init(config.verbosity);

    match cli.command {
        Commands::Similarity(args) => handlers::similarity::execute(&config, &args),
        Commands::Composite(args) => handlers::composite::execute(&config, &args).map(|_| ()),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let mut config = CliConfig::new().with_verbosity(verbosity);
    if let Some(ref path) = cli.config {
        config = config.with_engine(load_engine_config(path)?);
    }
    Ok(config)
}
