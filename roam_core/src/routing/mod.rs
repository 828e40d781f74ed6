pub mod arcflag;
pub mod astar;
pub mod dijkstra;
pub mod metric;
pub mod path;
pub(crate) mod search;
pub(crate) mod search_direction;

use fxhash::FxHashSet;

use crate::types::{Cost, NodeId};
use self::path::Path;

/// A point-to-point shortest-path computation over a fixed network.
pub trait ShortestPath {
    /// Cost of a cheapest source-to-destination path, or `None` when the
    /// destination is unreachable.
    fn cost(&self, source: NodeId, destination: NodeId) -> Option<Cost>;

    /// A cheapest source-to-destination path, or `None` when the
    /// destination is unreachable.
    fn path(&self, source: NodeId, destination: NodeId) -> Option<Path>;

    /// The nodes settled while answering the query, a proxy for the work
    /// the query did.
    fn search_space(&self, source: NodeId, destination: NodeId) -> FxHashSet<NodeId>;
}
