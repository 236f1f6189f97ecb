pub mod distances;
pub mod export;
pub mod inspect;
pub mod route;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use routemap_core::{RoadMap, RoadNetwork, RouteMapConfig, create_road_network, load_road_map};
use tracing::info;

use crate::cli::NetworkArgs;
use crate::config::FileConfig;

/// File settings with command line overrides applied on top
fn network_config(file_config: &FileConfig, overrides: &NetworkArgs) -> Result<RouteMapConfig> {
    let mut config = file_config.network.clone();
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

fn load_map(svg: &Path, config: &RouteMapConfig) -> Result<RoadMap> {
    load_road_map(svg, config).with_context(|| format!("failed to read map {}", svg.display()))
}

fn build_network(svg: &Path, config: &RouteMapConfig) -> Result<RoadNetwork> {
    let map = load_map(svg, config)?;
    let network = create_road_network(&map, config)
        .with_context(|| format!("failed to build road network for {}", svg.display()))?;
    info!(
        nodes = network.graph.node_count(),
        edges = network.graph.edge_count(),
        settlements = network.settlement_count(),
        "road network ready"
    );
    Ok(network)
}

/// Buffered writer to `path`, or to stdout when no path is given
fn output_writer(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    })
}
