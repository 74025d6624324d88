//! Parameter handling and output formatting for the `growth` binary.

use clap::{Parser, ValueEnum};
use growth_core::{Config, Frame, GrowthSession, SeedConfig, SessionError};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Grow a closed curve by differential growth and print its geometry.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of iterations to run.
    ///
    /// The node count grows by roughly a tenth per step and each step is
    /// quadratic in it, so large counts get slow quickly.
    #[arg(short, long, default_value_t = 25)]
    pub iterations: usize,

    /// JSON file with simulation and seeding parameters.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the effective parameters to this JSON file before running.
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Write output here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Emit node positions instead of line segments (text format only).
    #[arg(long)]
    pub points: bool,

    #[arg(long)]
    pub max_force: Option<f32>,

    #[arg(long)]
    pub max_speed: Option<f32>,

    #[arg(long)]
    pub desired_separation: Option<f32>,

    #[arg(long)]
    pub separation_cohesion_ratio: Option<f32>,

    #[arg(long)]
    pub max_edge_length: Option<f32>,

    /// Also subdivide the edge from the last node back to the first.
    #[arg(long)]
    pub grow_closing_edge: bool,

    /// Number of nodes in the initial ring.
    #[arg(long)]
    pub nodes: Option<usize>,

    /// Radius of the initial ring.
    #[arg(long)]
    pub radius: Option<f32>,

    /// Seed for the random stream; omit for a different run each time.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One segment (`x0 y0 x1 y1`) or point (`x y`) per line.
    Text,
    /// The whole frame as JSON.
    Json,
}

/// Everything needed to reproduce a run, as stored on disk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub simulation: Config,
    pub seed: SeedConfig,
}

impl RunConfig {
    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }
}

impl Args {
    /// Command-line values take precedence over the loaded configuration.
    pub fn apply_overrides(&self, cfg: &mut RunConfig) {
        let sim = &mut cfg.simulation;
        if let Some(v) = self.max_force {
            sim.max_force = v;
        }
        if let Some(v) = self.max_speed {
            sim.max_speed = v;
        }
        if let Some(v) = self.desired_separation {
            sim.desired_separation = v;
        }
        if let Some(v) = self.separation_cohesion_ratio {
            sim.separation_cohesion_ratio = v;
        }
        if let Some(v) = self.max_edge_length {
            sim.max_edge_length = v;
        }
        if self.grow_closing_edge {
            sim.grow_closing_edge = true;
        }

        if let Some(n) = self.nodes {
            cfg.seed.node_count = n;
        }
        if let Some(r) = self.radius {
            cfg.seed.radius = r;
        }
        if self.seed.is_some() {
            cfg.seed.seed = self.seed;
        }
    }
}

/// Runs a fresh session until `iterations` steps have been applied.
pub fn simulate(cfg: &RunConfig, iterations: usize) -> Result<Frame, SessionError> {
    let mut session = GrowthSession::new(cfg.seed);
    session.run_to(cfg.simulation, iterations)
}

/// Renders a frame in the requested format.
///
/// The text form starts with an `# iterations N` header line.
pub fn format_frame(
    frame: &Frame,
    format: OutputFormat,
    points: bool,
) -> Result<String, serde_json::Error> {
    if format == OutputFormat::Json {
        let mut json = serde_json::to_string_pretty(frame)?;
        json.push('\n');
        return Ok(json);
    }

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "# iterations {}", frame.iterations);
    if points {
        for p in &frame.points {
            let _ = writeln!(out, "{} {}", p.x, p.y);
        }
    } else {
        for s in &frame.segments {
            let _ = writeln!(out, "{} {} {} {}", s.start.x, s.start.y, s.end.x, s.end.y);
        }
    }
    Ok(out)
}
