use crate::types::{Cost, NodeId};

/// A lower bound on the shortest-path cost between two nodes.
///
/// A* requires the bound to be admissible (it never overestimates the
/// true cost) and consistent; both are assumed, not checked.
pub trait Metric {
    fn lower_bound(&self, from: NodeId, to: NodeId) -> Cost;
}

impl<M: Metric + ?Sized> Metric for &M {
    fn lower_bound(&self, from: NodeId, to: NodeId) -> Cost {
        (**self).lower_bound(from, to)
    }
}
