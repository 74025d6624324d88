//! Command-line driver for the differential growth simulation.
//!
//! This binary plays the host role: it gathers the simulation parameters,
//! drives a [`growth_core::GrowthSession`] for the requested number of
//! iterations and writes the resulting curve. Parameter handling and output
//! formatting live in the `runner` module.

mod runner;

use clap::Parser;
use runner::{Args, RunConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut run_cfg = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    args.apply_overrides(&mut run_cfg);

    if let Some(path) = &args.save_config {
        run_cfg.save(path)?;
        log::info!("saved configuration to {}", path.display());
    }

    let frame = runner::simulate(&run_cfg, args.iterations)?;
    log::info!(
        "finished {} iterations with {} nodes",
        frame.iterations,
        frame.points.len()
    );

    let text = runner::format_frame(&frame, args.format, args.points)?;
    match &args.output {
        Some(path) => std::fs::write(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}
