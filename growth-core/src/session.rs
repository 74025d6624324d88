//! Run/reset/iteration-count control around a [`GrowthCurve`].
//!
//! A host calls [`GrowthSession::solve`] repeatedly with the current control
//! inputs. The session owns at most one curve, creates it lazily, throws it
//! away on reset and advances it by at most one step per call until the
//! requested iteration count is reached.

use crate::{
    config::{Config, ConfigError, SeedConfig},
    curve::GrowthCurve,
    types::Segment,
};
use glam::Vec2;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Control inputs for one [`GrowthSession::solve`] call.
#[derive(Clone, Copy, Debug)]
pub struct SessionInputs {
    /// Total number of steps the curve should reach.
    pub iterations: usize,
    /// Parameters for the next curve. Ignored while a curve exists.
    pub config: Config,
    /// Discard the current curve and start over.
    pub reset: bool,
    /// Advance and report. When `false` nothing is emitted.
    pub run: bool,
}

/// What a running session reports after a call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    /// Steps applied to the current curve so far.
    pub iterations: usize,
    pub segments: Vec<Segment>,
    pub points: Vec<Vec2>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Stopped,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Running => f.write_str("Running"),
            SessionStatus::Stopped => f.write_str("Stopped"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("invalid simulation parameters: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot seed a ring with zero nodes")]
    EmptySeed,
}

/// Owns the curve between host calls.
#[derive(Debug)]
pub struct GrowthSession {
    seed: SeedConfig,
    curve: Option<GrowthCurve>,
    actual_runs: usize,
    initial: Vec<Segment>,
    status: SessionStatus,
}

impl GrowthSession {
    pub fn new(seed: SeedConfig) -> Self {
        Self {
            seed,
            curve: None,
            actual_runs: 0,
            initial: Vec::new(),
            status: SessionStatus::Stopped,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Steps applied to the current curve.
    pub fn actual_runs(&self) -> usize {
        self.actual_runs
    }

    pub fn curve(&self) -> Option<&GrowthCurve> {
        self.curve.as_ref()
    }

    /// The curve as it was before its first step, once running has begun.
    pub fn initial_segments(&self) -> &[Segment] {
        &self.initial
    }

    /// Drops the curve and all progress. The next call builds a new one.
    pub fn reset(&mut self) {
        if self.curve.is_some() {
            log::info!("session reset after {} iterations", self.actual_runs);
        }
        self.curve = None;
        self.initial.clear();
        self.actual_runs = 0;
    }

    /// Processes one round of host inputs.
    ///
    /// 1. The status becomes `Running` if `inputs.run`, else `Stopped`.
    /// 2. `inputs.reset` discards the current curve.
    /// 3. Without a curve, `inputs.config` is validated and a new curve is
    ///    seeded from the session's [`SeedConfig`].
    /// 4. When running, the pre-step geometry is captured on the first run;
    ///    then one step is taken if fewer than `inputs.iterations` steps have
    ///    been applied, otherwise the status becomes `Stopped`.
    ///
    /// ### Returns
    /// - `Ok(Some(frame))` when running.
    /// - `Ok(None)` when `inputs.run` is `false`.
    /// - `Err` if a curve had to be built from invalid parameters.
    pub fn solve(&mut self, inputs: SessionInputs) -> Result<Option<Frame>, SessionError> {
        self.status = if inputs.run {
            SessionStatus::Running
        } else {
            SessionStatus::Stopped
        };

        if inputs.reset {
            self.reset();
        }

        let curve = match self.curve.take() {
            Some(curve) => curve,
            None => self.build_curve(inputs.config)?,
        };
        let curve = self.curve.insert(curve);

        if !inputs.run {
            return Ok(None);
        }

        if self.actual_runs == 0 && self.initial.is_empty() {
            self.initial = curve.render_line();
        }

        if self.actual_runs < inputs.iterations {
            curve.step();
            self.actual_runs += 1;
        } else {
            self.status = SessionStatus::Stopped;
        }

        Ok(Some(Frame {
            iterations: self.actual_runs,
            segments: curve.render_line(),
            points: curve.node_positions(),
        }))
    }

    /// Keeps solving with `run` set until `iterations` steps are done.
    ///
    /// ### Returns
    /// The frame reported once the session stopped.
    pub fn run_to(&mut self, config: Config, iterations: usize) -> Result<Frame, SessionError> {
        let inputs = SessionInputs {
            iterations,
            config,
            reset: false,
            run: true,
        };
        loop {
            if let Some(frame) = self.solve(inputs)?
                && self.status == SessionStatus::Stopped
            {
                return Ok(frame);
            }
        }
    }

    fn build_curve(&self, config: Config) -> Result<GrowthCurve, SessionError> {
        config.validate()?;
        if self.seed.node_count == 0 {
            return Err(SessionError::EmptySeed);
        }

        let mut curve = match self.seed.seed {
            Some(seed) => GrowthCurve::new(config, seed),
            None => GrowthCurve::from_entropy(config),
        };
        curve.seed_ring(self.seed.node_count, self.seed.radius);
        log::info!(
            "new curve: {} nodes, radius {}, {:?}",
            self.seed.node_count,
            self.seed.radius,
            config
        );
        Ok(curve)
    }
}
