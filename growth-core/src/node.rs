use glam::Vec2;
use rand::Rng;

/// One particle on the growth curve.
///
/// A node carries its own copy of the force and speed limits, taken from the
/// curve's [`crate::config::Config`] when the node is created.
#[derive(Clone, Debug)]
pub struct Node {
    pub pos: Vec2,
    pub velocity: Vec2,
    /// Forces applied since the last [`Node::update`]; zeroed by it.
    pub acceleration: Vec2,
    pub max_force: f32,
    pub max_speed: f32,
}

impl Node {
    /// Creates a node at `pos` moving in a random unit direction.
    ///
    /// The initial velocity is drawn from `rng`, which is the owning curve's
    /// shared random stream.
    pub fn new(pos: Vec2, max_force: f32, max_speed: f32, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            velocity: random_unit_vector(rng),
            acceleration: Vec2::ZERO,
            max_force,
            max_speed,
        }
    }

    /// Adds `force` to the acceleration accumulated for this step.
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Integrates one step.
    ///
    /// Velocity absorbs the accumulated acceleration and is clamped to
    /// `max_speed`, position moves by the velocity, and acceleration is
    /// reset to zero.
    pub fn update(&mut self) {
        self.velocity += self.acceleration;
        self.velocity = self.velocity.clamp_length_max(self.max_speed);
        self.pos += self.velocity;
        self.acceleration = Vec2::ZERO;
    }

    /// Steering force that turns this node toward `target`.
    ///
    /// The desired velocity points at `target` with magnitude `max_speed`;
    /// the steer is the difference from the current velocity, clamped to
    /// `max_force`. Returns zero when `target` is the node's own position.
    pub fn seek(&self, target: Vec2) -> Vec2 {
        if target == self.pos {
            return Vec2::ZERO;
        }
        let desired = (target - self.pos).normalize_or_zero() * self.max_speed;
        let steer = desired - self.velocity;
        steer.clamp_length_max(self.max_force)
    }
}

/// Random direction in the plane with unit length.
///
/// Both components are drawn uniformly from `[-1, 1)`, then normalized.
/// The (practically impossible) all-zero draw yields `Vec2::ZERO`.
pub fn random_unit_vector(rng: &mut impl Rng) -> Vec2 {
    let x = rng.random_range(-1.0..1.0);
    let y = rng.random_range(-1.0..1.0);
    Vec2::new(x, y).normalize_or_zero()
}
