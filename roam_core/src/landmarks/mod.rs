pub mod greedy_farthest_provider;
pub mod landmark_metric;
pub mod random_provider;

use crate::error::NetworkError;
use crate::graph::PathNetwork;
use crate::types::NodeId;

/// Selects distinguished nodes whose distances to all other nodes are
/// worth precomputing.
pub trait LandmarkProvider {
    /// Picks `count` distinct landmark nodes.
    ///
    /// Fails with [`NetworkError::InvalidLandmarkCount`] for a count of
    /// zero and with [`NetworkError::TooFewNodes`] when the network has
    /// fewer nodes than requested.
    fn landmarks(&mut self, count: usize) -> Result<Vec<NodeId>, NetworkError>;
}

pub(crate) fn check_landmark_count(
    network: &PathNetwork,
    count: usize,
) -> Result<(), NetworkError> {
    if count == 0 {
        return Err(NetworkError::InvalidLandmarkCount);
    }
    if count > network.size() {
        return Err(NetworkError::TooFewNodes {
            requested: count,
            available: network.size(),
        });
    }
    Ok(())
}
