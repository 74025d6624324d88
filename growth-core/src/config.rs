use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulation-wide parameters of one growth curve.
///
/// These are fixed for the lifetime of a [`crate::curve::GrowthCurve`]:
/// changing any of them means building a new curve. Nodes copy `max_force`
/// and `max_speed` when they are created.
///
/// All five scalars must be non-negative and finite. The engine does not
/// check this; call [`Config::validate`] at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upper bound on the magnitude of any steering force.
    pub max_force: f32,
    /// Upper bound on node speed.
    pub max_speed: f32,
    /// Nodes closer than this repel each other.
    pub desired_separation: f32,
    /// Weight of the separation force relative to cohesion.
    pub separation_cohesion_ratio: f32,
    /// Edges longer than this get a midpoint node inserted.
    pub max_edge_length: f32,
    /// Also subdivide the closing edge (last node back to the first).
    ///
    /// Off by default: the closed curve is rendered and smoothed as a loop
    /// but only its open edges grow.
    pub grow_closing_edge: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_force: 0.15,
            max_speed: 2.0,
            desired_separation: 10.0,
            separation_cohesion_ratio: 11.0,
            max_edge_length: 5.0,
            grow_closing_edge: false,
        }
    }
}

impl Config {
    /// Squared separation radius, used by the pairwise distance test.
    #[inline]
    pub fn sq_desired_separation(&self) -> f32 {
        self.desired_separation * self.desired_separation
    }

    /// Checks that every scalar parameter is finite and non-negative.
    ///
    /// ### Returns
    /// - `Ok(())` if the configuration is usable.
    /// - `Err(ConfigError)` naming the first offending parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let params = [
            ("max_force", self.max_force),
            ("max_speed", self.max_speed),
            ("desired_separation", self.desired_separation),
            ("separation_cohesion_ratio", self.separation_cohesion_ratio),
            ("max_edge_length", self.max_edge_length),
        ];

        for (name, value) in params {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        Ok(())
    }
}

/// How the initial ring of nodes is laid out.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Number of nodes evenly spaced around the ring.
    pub node_count: usize,
    /// Ring radius, centered at the origin.
    pub radius: f32,
    /// Seed for the curve's random stream. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            node_count: 20,
            radius: 10.0,
            seed: None,
        }
    }
}

/// Rejected simulation parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("parameter `{name}` must be non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("parameter `{name}` must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },
}
