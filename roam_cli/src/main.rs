use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rand::seq::SliceRandom;
use tracing::info;

use roam_core::road_network::{RoadNetwork, RoadNode};
use roam_core::routing::arcflag::partitioning::RectanglePartitioningProvider;
use roam_core::routing::arcflag::ArcFlagShortestPath;
use roam_core::routing::ShortestPath;
use roam_core::tsv;

/// Reads an OSM file into a road network, reduces it to its largest
/// strongly connected component, preprocesses arc flags for a geographic
/// rectangle and runs random shortest-path queries against it.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// OSM XML file to load the road network from.
    #[arg(long)]
    osm_file: PathBuf,

    /// Minimal latitude of the arc-flag rectangle.
    #[arg(long, default_value_t = 49.20)]
    lat_min: f32,

    /// Maximal latitude of the arc-flag rectangle.
    #[arg(long, default_value_t = 49.25)]
    lat_max: f32,

    /// Minimal longitude of the arc-flag rectangle.
    #[arg(long, default_value_t = 6.95)]
    lon_min: f32,

    /// Maximal longitude of the arc-flag rectangle.
    #[arg(long, default_value_t = 7.05)]
    lon_max: f32,

    /// Number of random queries to run. Destinations are drawn from
    /// inside the rectangle.
    #[arg(long, default_value_t = 100)]
    queries: usize,

    /// Writes the search space of one final query to this file, one
    /// `<lat>\t<lon>` line per settled node.
    #[arg(long)]
    search_space_out: Option<PathBuf>,
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt().init();
    let cli = Cli::parse();

    info!(file = %cli.osm_file.display(), "loading road network");
    let started = Instant::now();
    let mut network =
        RoadNetwork::from_osm_file(&cli.osm_file).context("failed to read the OSM file")?;
    info!(
        nodes = network.size(),
        edges = network.edge_count(),
        elapsed = ?started.elapsed(),
        "road network created"
    );

    let started = Instant::now();
    network.reduce_to_largest_scc();
    info!(
        nodes = network.size(),
        edges = network.edge_count(),
        elapsed = ?started.elapsed(),
        "network reduced"
    );

    let provider = RectanglePartitioningProvider::new(
        &network,
        cli.lat_min,
        cli.lat_max,
        cli.lon_min,
        cli.lon_max,
    );
    let started = Instant::now();
    let computation = ArcFlagShortestPath::new(network.graph(), &provider);
    info!(elapsed = ?started.elapsed(), "arc flags ready");

    let nodes: Vec<RoadNode> = network.road_nodes().collect();
    let inside: Vec<RoadNode> = nodes
        .iter()
        .copied()
        .filter(|node| provider.is_inside_rectangle(node))
        .collect();
    anyhow::ensure!(!nodes.is_empty(), "the reduced network is empty");
    anyhow::ensure!(
        !inside.is_empty(),
        "no node of the reduced network lies inside the rectangle"
    );

    let mut rng = rand::thread_rng();
    let mut total_cost = 0.0f64;
    let mut answered = 0usize;
    let started = Instant::now();
    while answered < cli.queries {
        let source = nodes.choose(&mut rng).expect("nodes are not empty");
        let destination = inside.choose(&mut rng).expect("inside nodes are not empty");
        // The network is strongly connected after the reduction, so every
        // query gets an answer.
        let Some(cost) = computation.cost(source.id(), destination.id()) else {
            continue;
        };
        total_cost += cost as f64;
        answered += 1;
    }
    info!(
        queries = answered,
        average_cost = total_cost / answered.max(1) as f64,
        elapsed = ?started.elapsed(),
        "random queries finished"
    );

    if let Some(out_path) = cli.search_space_out {
        let source = nodes.choose(&mut rng).expect("nodes are not empty");
        let destination = inside.choose(&mut rng).expect("inside nodes are not empty");
        let search_space = computation.search_space(source.id(), destination.id());
        let settled: Vec<RoadNode> = nodes
            .iter()
            .copied()
            .filter(|node| search_space.contains(&node.id()))
            .collect();
        let node_count = settled.len();

        fs::write(&out_path, tsv::positions_tsv(settled))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        info!(
            file = %out_path.display(),
            nodes = node_count,
            "search space written"
        );
    }

    Ok(())
}
