use roam_core::landmarks::landmark_metric::LandmarkMetric;
use roam_core::road_network::RoadNetwork;

/// Read-only shared state: all preprocessing finishes before the server
/// starts, queries never mutate.
pub struct AppState {
    pub network: RoadNetwork,
    pub metric: LandmarkMetric,
}
