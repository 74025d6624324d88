use crate::types::NodeId;
use glam::Vec2;

/// Scratch buffer accumulating pairwise repulsion per node.
///
/// For each `NodeId`, this buffer stores:
///
/// - The sum of all repulsion vectors the node received.
/// - The number of near neighbours that contributed.
///
/// The separation pass fills it pair by pair and then reads back the
/// **average** repulsion of each node. It is owned by the curve and reused
/// between steps so its allocation survives across iterations.
#[derive(Debug, Default)]
pub struct ForceBuffer {
    /// Accumulated repulsion vectors for each node.
    sum: Vec<Vec2>,
    /// Number of near neighbours for each node.
    pub count: Vec<u32>,
}

impl ForceBuffer {
    /// Resizes the buffer to `len` entries and clears every entry.
    ///
    /// Entries are cleared even if the length was already correct.
    pub fn ensure_len(&mut self, len: usize) {
        if self.sum.len() != len {
            self.sum.resize(len, Vec2::ZERO);
            self.count.resize(len, 0);
        }
        self.clear();
    }

    /// Resets all sums to zero and all counts to `0`, keeping the length.
    pub fn clear(&mut self) {
        self.sum.fill(Vec2::ZERO);
        self.count.fill(0);
    }

    /// Records the repulsion between a near pair.
    ///
    /// `force` is the push felt by `i`; `j` receives its exact negation.
    /// Both neighbour counts are incremented.
    ///
    /// ### Panics
    /// Panics if `i` or `j` is out of bounds.
    #[inline]
    pub fn add_pair(&mut self, i: NodeId, j: NodeId, force: Vec2) {
        self.sum[i] += force;
        self.sum[j] -= force;
        self.count[i] += 1;
        self.count[j] += 1;
    }

    /// Average repulsion received by `id`, or `Vec2::ZERO` if it has no
    /// near neighbours.
    #[inline]
    pub fn avg(&self, id: NodeId) -> Vec2 {
        let c = self.count[id];
        if c == 0 {
            Vec2::ZERO
        } else {
            self.sum[id] / (c as f32)
        }
    }
}
