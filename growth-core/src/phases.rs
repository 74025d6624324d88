//! The passes that make up one differential-growth step.
//!
//! A step of [`crate::curve::GrowthCurve`] runs them in this order:
//! 1. [`separation_phase`] — every pair of nodes closer than the desired
//!    separation pushes apart; each node gets one averaged steering force.
//! 2. [`cohesion_phase`] — each node seeks the midpoint of its two curve
//!    neighbours, smoothing the curve locally.
//! 3. [`integration_phase`] — forces are applied and every node integrates
//!    its velocity and position.
//! 4. [`growth_phase`] — edges that stretched past the maximum length get a
//!    new node at their midpoint.
//!
//! Phases 1 and 2 only read node state, so both see the positions from
//! before the step. Phase 4 runs strictly after all integration.

use crate::{
    config::Config,
    force_buffer::ForceBuffer,
    node::Node,
    types::{NodeId, Segment},
};
use glam::Vec2;
use rand::Rng;

/// Raw repulsion felt by a node at `a` from a node at `b`.
///
/// Non-zero only when `0 < |a - b|² < sq_desired_separation`. The result
/// points from `b` to `a` with magnitude `1 / |a - b|`, so closer pairs push
/// harder. Swapping the arguments yields the exact negation.
///
/// ### Parameters
/// - `a` - Position of the node receiving the push.
/// - `b` - Position of the neighbour pushing it.
/// - `sq_desired_separation` - Squared interaction radius.
#[inline]
pub fn pair_repulsion(a: Vec2, b: Vec2, sq_desired_separation: f32) -> Vec2 {
    let diff = a - b;
    let d2 = diff.length_squared();
    if d2 > 0.0 && d2 < sq_desired_separation {
        diff.normalize_or_zero() / d2.sqrt()
    } else {
        Vec2::ZERO
    }
}

/// Turns an averaged repulsion into a bounded steering force.
///
/// The repulsion direction, scaled to `max_speed`, is the desired velocity;
/// the steer is that minus `velocity`, clamped to `max_force`. A zero
/// repulsion produces a zero force.
#[inline]
fn steer_away(repulsion: Vec2, velocity: Vec2, max_speed: f32, max_force: f32) -> Vec2 {
    if repulsion.length_squared() > 0.0 {
        let desired = repulsion.normalize_or_zero() * max_speed;
        (desired - velocity).clamp_length_max(max_force)
    } else {
        Vec2::ZERO
    }
}

/// Computes the separation steering force of every node.
///
/// All unordered pairs `(i, j)` with `i < j` are visited once. Each near
/// pair adds its [`pair_repulsion`] to `i` and the negation to `j` in `buf`,
/// and both neighbour counts go up. Every node's sum is then averaged over
/// its count and converted with the steering rule using the curve-wide
/// `cfg.max_speed` and `cfg.max_force`.
///
/// Curves with fewer than two nodes get zero forces.
///
/// ### Parameters
/// - `nodes` - Curve nodes; only read.
/// - `cfg` - Curve parameters (separation radius, speed and force limits).
/// - `buf` - Scratch accumulator, resized and cleared here.
///
/// ### Returns
/// One force per node, in node order.
pub fn separation_phase(nodes: &[Node], cfg: &Config, buf: &mut ForceBuffer) -> Vec<Vec2> {
    let n = nodes.len();
    if n < 2 {
        return vec![Vec2::ZERO; n];
    }

    let sq_sep = cfg.sq_desired_separation();
    buf.ensure_len(n);

    for i in 0..n {
        let pi = nodes[i].pos;
        for j in (i + 1)..n {
            let f = pair_repulsion(pi, nodes[j].pos, sq_sep);
            if f != Vec2::ZERO {
                buf.add_pair(i, j, f);
            }
        }
    }

    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| steer_away(buf.avg(i), node.velocity, cfg.max_speed, cfg.max_force))
        .collect()
}

/// Parallel form of [`separation_phase`].
///
/// Each node sums its own row of pairwise repulsions independently, in
/// ascending partner order. That is the same order the pairwise pass adds
/// them in, so the output is bit-identical to [`separation_phase`].
#[cfg(feature = "parallel")]
pub fn separation_phase_par(nodes: &[Node], cfg: &Config) -> Vec<Vec2> {
    use rayon::prelude::*;

    let n = nodes.len();
    if n < 2 {
        return vec![Vec2::ZERO; n];
    }

    let sq_sep = cfg.sq_desired_separation();

    (0..n)
        .into_par_iter()
        .map(|i| {
            let pi = nodes[i].pos;
            let mut sum = Vec2::ZERO;
            let mut count = 0u32;
            for (j, other) in nodes.iter().enumerate() {
                if j == i {
                    continue;
                }
                let f = pair_repulsion(pi, other.pos, sq_sep);
                if f != Vec2::ZERO {
                    sum += f;
                    count += 1;
                }
            }
            let avg = if count > 0 { sum / count as f32 } else { sum };
            steer_away(avg, nodes[i].velocity, cfg.max_speed, cfg.max_force)
        })
        .collect()
}

/// Computes the cohesion steering force of every node.
///
/// Each node seeks the midpoint of its previous and next neighbour in the
/// closed cyclic order (indices wrap at both ends).
///
/// Curves with fewer than two nodes get zero forces.
pub fn cohesion_phase(nodes: &[Node]) -> Vec<Vec2> {
    let n = nodes.len();
    if n < 2 {
        return vec![Vec2::ZERO; n];
    }

    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let prev = nodes[(i + n - 1) % n].pos;
            let next = nodes[(i + 1) % n].pos;
            node.seek((prev + next) / 2.0)
        })
        .collect()
}

/// Applies precomputed forces and integrates every node.
///
/// Each node receives `separation[i] * separation_cohesion_ratio` plus
/// `cohesion[i]`, then calls [`Node::update`]. A node's update only touches
/// its own state, so the visiting order does not matter.
///
/// ### Panics
/// Panics if the force slices are shorter than `nodes`.
pub fn integration_phase(
    nodes: &mut [Node],
    separation: &[Vec2],
    cohesion: &[Vec2],
    separation_cohesion_ratio: f32,
) {
    for (i, node) in nodes.iter_mut().enumerate() {
        node.apply_force(separation[i] * separation_cohesion_ratio);
        node.apply_force(cohesion[i]);
        node.update();
    }
}

/// Subdivides every edge longer than `cfg.max_edge_length`.
///
/// The edges checked are the consecutive pairs `(i, i + 1)` of the current
/// sequence; the closing edge (last node back to the first) is only checked
/// when `cfg.grow_closing_edge` is set and the curve has at least three
/// nodes. Every edge is measured once, before any insertion, and an edge
/// that is too long gets exactly one new node at its midpoint, placed
/// between its endpoints in the sequence (a split closing edge appends its
/// node at the end).
///
/// New nodes take the curve-wide force and speed limits and draw a random
/// initial velocity from `rng`, in edge order.
///
/// ### Returns
/// Ids of the inserted nodes in the grown sequence, ascending.
pub fn growth_phase(nodes: &mut Vec<Node>, cfg: &Config, rng: &mut impl Rng) -> Vec<NodeId> {
    let n = nodes.len();
    if n < 2 {
        return Vec::new();
    }

    let close = cfg.grow_closing_edge && n > 2;
    let midpoints: Vec<Option<Vec2>> = (0..n)
        .map(|i| {
            let a = nodes[i].pos;
            let b = if i + 1 < n {
                nodes[i + 1].pos
            } else if close {
                nodes[0].pos
            } else {
                return None;
            };
            let edge = Segment::new(a, b);
            (edge.length() > cfg.max_edge_length).then(|| edge.midpoint())
        })
        .collect();

    let splits = midpoints.iter().flatten().count();
    if splits == 0 {
        return Vec::new();
    }

    let old = std::mem::take(nodes);
    nodes.reserve(n + splits);
    let mut new_ids = Vec::with_capacity(splits);

    for (node, mid) in old.into_iter().zip(midpoints) {
        nodes.push(node);
        if let Some(pos) = mid {
            new_ids.push(nodes.len());
            nodes.push(Node::new(pos, cfg.max_force, cfg.max_speed, rng));
        }
    }

    log::trace!("growth: {} of {} edges subdivided", splits, n);
    new_ids
}
