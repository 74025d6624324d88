use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifier for a node in a [`crate::curve::GrowthCurve`].
///
/// This is an index into `GrowthCurve::nodes`, i.e. the node's position in
/// traversal order. Growth inserts nodes mid-sequence, so an id is only
/// meaningful until the next call to [`crate::curve::GrowthCurve::step`].
pub type NodeId = usize;

/// A straight line segment between two consecutive curve nodes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) / 2.0
    }
}
