#[cfg(test)]
pub(crate) mod test_network {
    use crate::graph::PathNetwork;
    use crate::road_network::{Road, RoadNetwork};
    use crate::road_type::RoadType;
    use crate::types::{Cost, NodeId};

    pub fn network_from_edges(
        nodes: &[NodeId],
        edges: &[(NodeId, NodeId, Cost)],
    ) -> PathNetwork {
        let mut network = PathNetwork::new();
        for &node in nodes {
            network.add_node(node);
        }
        for &(source, destination, cost) in edges {
            network
                .add_edge(source, destination, cost)
                .expect("test edge");
        }
        network
    }

    /// The ring 0 -> 1 -> 2 -> 3 -> 0, every edge of cost 1.
    pub fn ring_network() -> PathNetwork {
        network_from_edges(
            &[0, 1, 2, 3],
            &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0)],
        )
    }

    /// The line 0 -> 1 -> 2 -> 3, every edge of cost 1.
    pub fn line_network() -> PathNetwork {
        network_from_edges(&[0, 1, 2, 3], &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)])
    }

    /// 0 <-> 1 (1), 1 <-> 2 (1), 2 <-> 3 (10): node 3 is the extremum any
    /// farthest-point selection has to find.
    pub fn farthest_network() -> PathNetwork {
        network_from_edges(
            &[0, 1, 2, 3],
            &[
                (0, 1, 1.0),
                (1, 0, 1.0),
                (1, 2, 1.0),
                (2, 1, 1.0),
                (2, 3, 10.0),
                (3, 2, 10.0),
            ],
        )
    }

    /// Two road nodes at the corners of the saarland example rectangle,
    /// joined by a two-way motorway.
    pub fn motorway_pair() -> RoadNetwork {
        let mut network = RoadNetwork::new();
        network.add_road_node(1, 49.20, 6.95);
        network.add_road_node(2, 49.25, 7.05);
        network
            .add_road(&Road::new(1, vec![1, 2], RoadType::Motorway, false))
            .expect("road over known nodes");
        network
    }

    /// Like [`motorway_pair`], but one-way from node 1 to node 2.
    pub fn one_way_pair() -> RoadNetwork {
        let mut network = RoadNetwork::new();
        network.add_road_node(1, 49.20, 6.95);
        network.add_road_node(2, 49.25, 7.05);
        network
            .add_road(&Road::new(1, vec![1, 2], RoadType::Motorway, true))
            .expect("road over known nodes");
        network
    }
}
