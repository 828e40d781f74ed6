use rand::rngs::ThreadRng;
use rand::seq::IteratorRandom;

use crate::error::NetworkError;
use crate::graph::PathNetwork;
use crate::landmarks::{check_landmark_count, LandmarkProvider};
use crate::types::NodeId;

/// Samples landmarks uniformly at random, without replacement.
pub struct RandomLandmarkProvider<'a> {
    network: &'a PathNetwork,
    rng: ThreadRng,
}

impl<'a> RandomLandmarkProvider<'a> {
    pub fn new(network: &'a PathNetwork) -> Self {
        RandomLandmarkProvider {
            network,
            rng: rand::thread_rng(),
        }
    }
}

impl LandmarkProvider for RandomLandmarkProvider<'_> {
    fn landmarks(&mut self, count: usize) -> Result<Vec<NodeId>, NetworkError> {
        check_landmark_count(self.network, count)?;
        Ok(self.network.nodes().choose_multiple(&mut self.rng, count))
    }
}
