use fxhash::FxHashSet;
use rand::rngs::ThreadRng;
use rand::seq::IteratorRandom;

use crate::error::NetworkError;
use crate::graph::PathNetwork;
use crate::landmarks::{check_landmark_count, LandmarkProvider};
use crate::routing::dijkstra::Dijkstra;
use crate::types::{Cost, NodeId};

/// Picks the first landmark uniformly at random, then repeatedly adds the
/// node farthest away from the set chosen so far, measured by a
/// multi-source Dijkstra from the whole set. Ties keep the first node
/// encountered in iteration order.
pub struct GreedyFarthestLandmarkProvider<'a> {
    network: &'a PathNetwork,
    rng: ThreadRng,
}

impl<'a> GreedyFarthestLandmarkProvider<'a> {
    pub fn new(network: &'a PathNetwork) -> Self {
        GreedyFarthestLandmarkProvider {
            network,
            rng: rand::thread_rng(),
        }
    }
}

impl LandmarkProvider for GreedyFarthestLandmarkProvider<'_> {
    fn landmarks(&mut self, count: usize) -> Result<Vec<NodeId>, NetworkError> {
        check_landmark_count(self.network, count)?;

        let first = self
            .network
            .nodes()
            .choose(&mut self.rng)
            .ok_or(NetworkError::EmptyNetwork)?;
        let mut landmarks = vec![first];
        let mut chosen: FxHashSet<NodeId> = FxHashSet::default();
        chosen.insert(first);

        let dijkstra = Dijkstra::new(self.network);
        while landmarks.len() < count {
            let costs = dijkstra.cost_map_from_all(&landmarks);

            let mut farthest: Option<(Cost, NodeId)> = None;
            for node in self.network.nodes() {
                if chosen.contains(&node) {
                    continue;
                }
                let Some(&cost) = costs.get(&node) else {
                    continue;
                };
                if farthest.map_or(true, |(best, _)| cost > best) {
                    farthest = Some((cost, node));
                }
            }

            let next = match farthest {
                Some((_, node)) => node,
                // The remainder is unreachable from the current set; fall
                // back to the first unchosen node so the contract of
                // returning `count` landmarks still holds.
                None => self
                    .network
                    .nodes()
                    .find(|node| !chosen.contains(node))
                    .ok_or(NetworkError::EmptyNetwork)?,
            };
            landmarks.push(next);
            chosen.insert(next);
        }

        Ok(landmarks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_network_utils::test_network;

    #[test]
    fn the_extremum_is_always_selected() {
        let network = test_network::farthest_network();
        let mut provider = GreedyFarthestLandmarkProvider::new(&network);
        // Whatever the random seed picks first, node 3 sits behind the
        // only expensive edge and must be part of any 2-landmark set.
        for _ in 0..10 {
            let landmarks = provider.landmarks(2).unwrap();
            assert_eq!(landmarks.len(), 2);
            assert!(landmarks.contains(&3), "got {landmarks:?}");
        }
    }

    #[test]
    fn landmark_sets_grow_up_to_the_whole_network() {
        let network = test_network::farthest_network();
        let mut provider = GreedyFarthestLandmarkProvider::new(&network);
        for count in 1..=4 {
            let landmarks = provider.landmarks(count).unwrap();
            assert_eq!(landmarks.len(), count);
            let distinct: FxHashSet<_> = landmarks.iter().copied().collect();
            assert_eq!(distinct.len(), count);
            for landmark in landmarks {
                assert!(network.contains_node(landmark));
            }
        }
    }

    #[test]
    fn counts_are_validated() {
        let network = test_network::farthest_network();
        let mut provider = GreedyFarthestLandmarkProvider::new(&network);
        assert!(matches!(
            provider.landmarks(0),
            Err(NetworkError::InvalidLandmarkCount)
        ));
        assert!(matches!(
            provider.landmarks(5),
            Err(NetworkError::TooFewNodes { .. })
        ));
    }

    #[test]
    fn disconnected_remainders_still_fill_the_set() {
        // Two separate rings; whichever ring seeds the set, the other one
        // is unreachable but must still contribute landmarks.
        let mut network = test_network::ring_network();
        for node in 10..14 {
            network.add_node(node);
        }
        network.add_edge(10, 11, 1.0).unwrap();
        network.add_edge(11, 10, 1.0).unwrap();
        network.add_edge(12, 13, 1.0).unwrap();
        network.add_edge(13, 12, 1.0).unwrap();

        let mut provider = GreedyFarthestLandmarkProvider::new(&network);
        let landmarks = provider.landmarks(8).unwrap();
        assert_eq!(landmarks.len(), 8);
    }
}
