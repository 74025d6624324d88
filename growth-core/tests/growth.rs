use glam::Vec2;
use growth_core::{Config, GrowthCurve};

const EPS: f32 = 1e-4;

/// Node count grows roughly 10% per step under the reference parameters and
/// every step is quadratic in it; 25 steps stay around a thousand nodes.
const STEPS: usize = 25;

fn reference_config() -> Config {
    Config {
        max_force: 0.15,
        max_speed: 2.0,
        desired_separation: 10.0,
        separation_cohesion_ratio: 11.0,
        max_edge_length: 5.0,
        grow_closing_edge: false,
    }
}

fn ring(cfg: Config, count: usize, radius: f32, seed: u64) -> GrowthCurve {
    let mut curve = GrowthCurve::new(cfg, seed);
    curve.seed_ring(count, radius);
    curve
}

#[test]
fn four_node_ring_splits_every_open_edge_on_first_step() {
    let mut curve = ring(reference_config(), 4, 10.0, 42);

    let initial = curve.render_line();
    for seg in &initial {
        assert!((seg.length() - 200f32.sqrt()).abs() < EPS);
    }

    curve.step();

    // Growth only checks the open pairs (i, i + 1); the last-to-first edge
    // stays whole unless `grow_closing_edge` is set, so 4 + 3 nodes.
    assert_eq!(curve.len(), 7);
}

#[test]
fn four_node_ring_with_closing_edge_growth_doubles() {
    let cfg = Config {
        grow_closing_edge: true,
        ..reference_config()
    };
    let mut curve = ring(cfg, 4, 10.0, 42);

    curve.step();

    assert_eq!(curve.len(), 8);
}

#[test]
fn two_node_curve_steps_without_blowing_up() {
    let mut curve = GrowthCurve::new(reference_config(), 3);
    curve.add_node(Vec2::new(0.0, 0.0));
    curve.add_node(Vec2::new(1.0, 0.0));

    for _ in 0..10 {
        curve.step();
    }

    assert!(curve.len() >= 2);
    for node in &curve.nodes {
        assert!(node.pos.is_finite());
        assert!(node.velocity.is_finite());
    }
}

#[test]
fn single_node_curve_drifts_without_forces() {
    let mut curve = GrowthCurve::new(reference_config(), 3);
    curve.add_node(Vec2::new(5.0, 5.0));
    let velocity = curve.nodes[0].velocity;

    assert_eq!(curve.separation_forces(), vec![Vec2::ZERO]);
    assert_eq!(curve.cohesion_forces(), vec![Vec2::ZERO]);

    curve.step();

    assert_eq!(curve.len(), 1);
    assert_eq!(curve.nodes[0].pos, Vec2::new(5.0, 5.0) + velocity);
}

#[test]
fn growth_count_matches_long_open_edges() {
    let mut curve = ring(reference_config(), 20, 10.0, 7);

    for _ in 0..STEPS {
        curve.differentiate();
        let long_edges = curve
            .nodes
            .windows(2)
            .filter(|w| w[0].pos.distance(w[1].pos) > 5.0)
            .count();
        let before = curve.len();

        let new_ids = curve.growth();

        assert_eq!(new_ids.len(), long_edges);
        assert_eq!(curve.len(), before + long_edges);
        for id in new_ids {
            let mid = (curve.nodes[id - 1].pos + curve.nodes[id + 1].pos) / 2.0;
            assert_eq!(curve.nodes[id].pos, mid);
        }
    }
}

#[test]
fn limits_hold_over_many_steps() {
    let cfg = reference_config();
    let mut curve = ring(cfg, 20, 10.0, 11);

    for _ in 0..STEPS {
        for f in curve.separation_forces() {
            assert!(f.length() <= cfg.max_force + EPS);
        }
        for f in curve.cohesion_forces() {
            assert!(f.length() <= cfg.max_force + EPS);
        }

        curve.step();

        for node in &curve.nodes {
            assert!(node.velocity.length() <= cfg.max_speed + EPS);
        }
    }
}

#[test]
fn rendering_stays_closed_while_growing() {
    let mut curve = ring(reference_config(), 20, 10.0, 5);

    for _ in 0..STEPS {
        curve.step();
        let segments = curve.render_line();
        assert_eq!(segments.len(), curve.len());
        assert_eq!(segments.last().map(|s| s.end), Some(segments[0].start));
        assert_eq!(curve.node_positions().len(), curve.len());
    }
}

#[test]
fn identical_seeds_give_identical_runs() {
    let mut a = ring(reference_config(), 20, 10.0, 1234);
    let mut b = ring(reference_config(), 20, 10.0, 1234);

    for _ in 0..STEPS {
        a.step();
        b.step();
    }

    assert_eq!(a.node_positions(), b.node_positions());
}

#[test]
fn node_count_never_decreases() {
    let mut curve = ring(reference_config(), 20, 10.0, 21);
    let mut last = curve.len();

    for _ in 0..STEPS {
        curve.step();
        assert!(curve.len() >= last);
        last = curve.len();
    }
    assert!(last > 20);
}
