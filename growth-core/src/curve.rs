use crate::{
    config::Config,
    force_buffer::ForceBuffer,
    node::Node,
    phases,
    types::{NodeId, Segment},
};
use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};
use std::f32::consts::TAU;

/// Above this many nodes the separation pass runs on the rayon pool.
#[cfg(feature = "parallel")]
const PARALLEL_MIN_NODES: usize = 512;

/// A closed polyline of particles that repel, cohere and subdivide.
///
/// `nodes` is in traversal order and implicitly closed: the last node
/// connects back to the first. The curve owns one random stream that every
/// node it creates draws its initial velocity from.
#[derive(Debug)]
pub struct GrowthCurve {
    pub nodes: Vec<Node>,
    cfg: Config,
    rng: StdRng,
    forces: ForceBuffer,
}

impl GrowthCurve {
    /// Creates an empty curve whose random stream is seeded with `seed`.
    ///
    /// `cfg` must hold non-negative finite values (see [`Config::validate`]).
    pub fn new(cfg: Config, seed: u64) -> Self {
        Self::with_rng(cfg, StdRng::seed_from_u64(seed))
    }

    /// Creates an empty curve with an OS-seeded random stream.
    pub fn from_entropy(cfg: Config) -> Self {
        Self::with_rng(cfg, StdRng::from_os_rng())
    }

    pub fn with_rng(cfg: Config, rng: StdRng) -> Self {
        Self {
            nodes: Vec::new(),
            cfg,
            rng,
            forces: ForceBuffer::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a node at `pos` with the curve's limits and a random velocity.
    pub fn add_node(&mut self, pos: Vec2) -> NodeId {
        let node = Node::new(pos, self.cfg.max_force, self.cfg.max_speed, &mut self.rng);
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Appends `node_count` nodes evenly spaced on a circle.
    ///
    /// Node `k` sits at angle `k * 2π / node_count` on a circle of `radius`
    /// around the origin. With the same seed, count and radius the ring
    /// (velocities included) is identical.
    pub fn seed_ring(&mut self, node_count: usize, radius: f32) {
        self.nodes.reserve(node_count);
        for k in 0..node_count {
            let angle = k as f32 * TAU / node_count as f32;
            self.add_node(Vec2::new(angle.cos() * radius, angle.sin() * radius));
        }
        log::debug!("seeded ring of {} nodes, radius {}", node_count, radius);
    }

    /// Advances the simulation by one iteration.
    ///
    /// Runs [`GrowthCurve::differentiate`] and then [`GrowthCurve::growth`].
    ///
    /// ### Returns
    /// Ids of the nodes inserted by this step.
    pub fn step(&mut self) -> Vec<NodeId> {
        self.differentiate();
        let new_ids = self.growth();
        log::debug!(
            "step: {} nodes ({} inserted)",
            self.nodes.len(),
            new_ids.len()
        );
        new_ids
    }

    /// Computes separation and cohesion for every node, then integrates.
    ///
    /// Both force sets are computed from the positions before this call.
    pub fn differentiate(&mut self) {
        let separation = self.separation_forces();
        let cohesion = self.cohesion_forces();
        log::trace!("differentiate: {} nodes", self.nodes.len());
        phases::integration_phase(
            &mut self.nodes,
            &separation,
            &cohesion,
            self.cfg.separation_cohesion_ratio,
        );
    }

    /// Subdivides over-long edges. See [`phases::growth_phase`].
    pub fn growth(&mut self) -> Vec<NodeId> {
        phases::growth_phase(&mut self.nodes, &self.cfg, &mut self.rng)
    }

    /// Separation steering force of every node, without applying it.
    pub fn separation_forces(&mut self) -> Vec<Vec2> {
        #[cfg(feature = "parallel")]
        {
            if self.nodes.len() >= PARALLEL_MIN_NODES {
                return phases::separation_phase_par(&self.nodes, &self.cfg);
            }
        }
        phases::separation_phase(&self.nodes, &self.cfg, &mut self.forces)
    }

    /// Cohesion steering force of every node, without applying it.
    pub fn cohesion_forces(&self) -> Vec<Vec2> {
        phases::cohesion_phase(&self.nodes)
    }

    /// Lazily yields the closed polygon's edges.
    ///
    /// One segment per node: `i -> i + 1`, and the last node back to the
    /// first. A single node yields one zero-length segment; an empty curve
    /// yields nothing.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.nodes.len();
        (0..n).map(move |i| Segment::new(self.nodes[i].pos, self.nodes[(i + 1) % n].pos))
    }

    /// Collects [`GrowthCurve::segments`] into a list.
    pub fn render_line(&self) -> Vec<Segment> {
        self.segments().collect()
    }

    pub fn node_positions(&self) -> Vec<Vec2> {
        self.nodes.iter().map(|n| n.pos).collect()
    }
}
