mod error;
mod route;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use clap::Parser;
use tracing::{info, Level};

use roam_core::landmarks::greedy_farthest_provider::GreedyFarthestLandmarkProvider;
use roam_core::landmarks::landmark_metric::LandmarkMetric;
use roam_core::landmarks::LandmarkProvider;
use roam_core::road_network::RoadNetwork;

use crate::state::AppState;

/// Serves point-to-point routing queries over a road network read from
/// an OSM file.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// OSM XML file to load the road network from.
    #[arg(long)]
    osm_file: PathBuf,

    /// Number of landmarks for the A* heuristic.
    #[arg(long, default_value_t = 42)]
    landmarks: usize,

    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
    let cli = Cli::parse();

    let mut network =
        RoadNetwork::from_osm_file(&cli.osm_file).context("failed to read the OSM file")?;
    network.reduce_to_largest_scc();
    info!(
        nodes = network.size(),
        edges = network.edge_count(),
        "road network ready"
    );

    let landmarks = GreedyFarthestLandmarkProvider::new(network.graph())
        .landmarks(cli.landmarks)
        .context("failed to select landmarks")?;
    let metric = LandmarkMetric::new(network.graph(), &landmarks);

    let state = Arc::new(AppState { network, metric });
    let app = Router::new()
        .route("/route", get(route::route_handler))
        .route("/health", get(|| async { "ok" }))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    info!(address = %cli.bind, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
