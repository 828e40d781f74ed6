use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, info, warn};

use crate::error::OsmError;
use crate::road_network::{Road, RoadNetwork};
use crate::road_type::RoadType;
use crate::types::NodeId;

/// Streaming reader for the OSM XML text format.
///
/// Only the elements a road network needs are interpreted: `node` (id,
/// lat, lon) and `way` with its `nd` references and the `highway` and
/// `oneway` tags. Relations and all other elements are skipped. Ingestion
/// is permissive: ways without a supported highway type are dropped, as
/// are ways with fewer than two nodes or malformed attributes. Nodes are
/// expected before the ways referencing them, the order OSM files use.
#[derive(Default)]
pub struct OsmReader {
    network: RoadNetwork,
    current_way: Option<PendingWay>,
    accepted_roads: usize,
    dropped_roads: usize,
}

struct PendingWay {
    id: i64,
    nodes: Vec<NodeId>,
    road_type: Option<RoadType>,
    one_way: bool,
}

impl OsmReader {
    pub fn new() -> Self {
        OsmReader::default()
    }

    /// Consumes the reader and parses everything into a road network.
    pub fn read<R: BufRead>(mut self, reader: R) -> Result<RoadNetwork, OsmError> {
        let mut xml = Reader::from_reader(reader);
        let mut buffer = Vec::new();

        loop {
            match xml.read_event_into(&mut buffer)? {
                Event::Start(element) | Event::Empty(element) => self.handle_element(&element),
                Event::End(element) if element.name().as_ref() == b"way" => self.finish_way(),
                Event::Eof => break,
                _ => {}
            }
            buffer.clear();
        }

        info!(
            nodes = self.network.size(),
            edges = self.network.edge_count(),
            roads = self.accepted_roads,
            dropped = self.dropped_roads,
            "parsed OSM data"
        );
        Ok(self.network)
    }

    fn handle_element(&mut self, element: &BytesStart) {
        match element.name().as_ref() {
            b"node" => self.handle_node(element),
            b"way" => {
                self.current_way = Some(PendingWay {
                    id: attribute_value(element, b"id")
                        .and_then(|id| id.parse().ok())
                        .unwrap_or_default(),
                    nodes: Vec::new(),
                    road_type: None,
                    one_way: false,
                });
            }
            b"nd" => {
                if let Some(way) = &mut self.current_way {
                    if let Some(node) =
                        attribute_value(element, b"ref").and_then(|r| r.parse().ok())
                    {
                        way.nodes.push(node);
                    }
                }
            }
            b"tag" => self.handle_tag(element),
            _ => {}
        }
    }

    fn handle_node(&mut self, element: &BytesStart) {
        let id = attribute_value(element, b"id").and_then(|value| value.parse::<NodeId>().ok());
        let lat = attribute_value(element, b"lat").and_then(|value| value.parse::<f32>().ok());
        let lon = attribute_value(element, b"lon").and_then(|value| value.parse::<f32>().ok());
        match (id, lat, lon) {
            (Some(id), Some(lat), Some(lon)) => {
                self.network.add_road_node(id, lat, lon);
            }
            _ => debug!("skipping malformed node element"),
        }
    }

    fn handle_tag(&mut self, element: &BytesStart) {
        let Some(way) = &mut self.current_way else {
            return;
        };
        let (Some(key), Some(value)) = (
            attribute_value(element, b"k"),
            attribute_value(element, b"v"),
        ) else {
            return;
        };

        match key.as_str() {
            "highway" => match RoadType::from_osm_name(&value) {
                Ok(road_type) => way.road_type = Some(road_type),
                Err(_) => {
                    debug!(way = way.id, highway = %value, "unsupported highway type");
                    way.road_type = None;
                }
            },
            "oneway" if value == "yes" => way.one_way = true,
            _ => {}
        }
    }

    fn finish_way(&mut self) {
        let Some(way) = self.current_way.take() else {
            return;
        };
        // Ways without a usable highway type are not roads.
        let Some(road_type) = way.road_type else {
            return;
        };

        let road = Road::new(way.id, way.nodes, road_type, way.one_way);
        match self.network.add_road(&road) {
            Ok(()) => self.accepted_roads += 1,
            Err(error) => {
                warn!(way = way.id, error = %error, "dropping road");
                self.dropped_roads += 1;
            }
        }
    }
}

/// Reads one attribute, treating malformed attribute lists as absent.
fn attribute_value(element: &BytesStart, name: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attribute| attribute.key.as_ref() == name)
        .and_then(|attribute| {
            attribute
                .unescape_value()
                .ok()
                .map(|value| value.into_owned())
        })
}

impl RoadNetwork {
    /// Reads a road network from an OSM XML file.
    pub fn from_osm_file(path: impl AsRef<Path>) -> Result<RoadNetwork, OsmError> {
        let file = File::open(path)?;
        OsmReader::new().read(BufReader::new(file))
    }

    /// Reads a road network from OSM XML data.
    pub fn from_osm_reader<R: BufRead>(reader: R) -> Result<RoadNetwork, OsmError> {
        OsmReader::new().read(reader)
    }
}
