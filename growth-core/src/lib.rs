//! Core 2-D differential growth simulation library.
//!
//! A closed polyline of particles repels itself at short range, coheres to
//! its local neighbours along the curve and subdivides edges that stretch
//! too far, filling space with an ever longer, folding curve.
//!
//! Main components:
//! - [`curve`] — the growth curve and its step loop.
//! - [`node`] — curve particles and their steering primitives.
//! - [`phases`] — the separation, cohesion, integration and growth passes.
//! - [`force_buffer`] — scratch accumulator for pairwise repulsion.
//! - [`config`] — simulation parameters and ring seeding.
//! - [`session`] — run/reset/iteration-count control for a host.
//! - [`types`] — shared ids and segment type.

pub mod config;
pub mod curve;
pub mod force_buffer;
pub mod node;
pub mod phases;
pub mod session;
pub mod types;

pub use config::{Config, ConfigError, SeedConfig};
pub use curve::GrowthCurve;
pub use node::Node;
pub use session::{Frame, GrowthSession, SessionError, SessionInputs, SessionStatus};
pub use types::{NodeId, Segment};
