use thiserror::Error;

use crate::types::{Cost, NodeId};

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("node {0} is not part of the network")]
    UnknownNode(NodeId),
    #[error("edge cost must be non-negative, got {0}")]
    InvalidCost(Cost),
    #[error("unknown road type `{0}`")]
    UnknownRoadType(String),
    #[error("landmark count must be greater than zero")]
    InvalidLandmarkCount,
    #[error("requested {requested} landmarks but the network only has {available} nodes")]
    TooFewNodes { requested: usize, available: usize },
    #[error("the network has no nodes")]
    EmptyNetwork,
}

#[derive(Error, Debug)]
pub enum OsmError {
    #[error("failed to read OSM data")]
    Io(#[from] std::io::Error),
    #[error("malformed OSM XML")]
    Xml(#[from] quick_xml::Error),
}
