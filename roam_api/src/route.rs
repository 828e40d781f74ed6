use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use roam_core::routing::astar::AStar;
use roam_core::routing::ShortestPath;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RouteQuery {
    from_lat: f32,
    from_lon: f32,
    to_lat: f32,
    to_lon: f32,
}

#[derive(Serialize)]
pub struct RouteResponse {
    cost_seconds: f32,
    nodes: Vec<[f32; 2]>,
}

/// Maps both positions to their nearest road nodes and answers with an
/// A* + landmarks query.
pub async fn route_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteResponse>, ApiError> {
    let network = &state.network;
    let source = network
        .nearest_road_node(query.from_lat, query.from_lon)
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;
    let destination = network
        .nearest_road_node(query.to_lat, query.to_lon)
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;

    let astar = AStar::with_metric(network.graph(), &state.metric);
    let path = astar
        .path(source.id(), destination.id())
        .ok_or_else(|| ApiError::NotFound("no route between the given positions".to_string()))?;

    let nodes = path
        .nodes()
        .filter_map(|id| network.road_node(id))
        .map(|node| [node.latitude(), node.longitude()])
        .collect();

    Ok(Json(RouteResponse {
        cost_seconds: path.cost(),
        nodes,
    }))
}
