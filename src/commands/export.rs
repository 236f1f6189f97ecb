use std::io::Write;
use std::path::Path;

use anyhow::Result;
use routemap_core::export::network_to_geojson;
use tracing::info;

use super::{build_network, network_config, output_writer};
use crate::cli::NetworkArgs;
use crate::config::FileConfig;

pub fn run(
    svg: &Path,
    output: Option<&Path>,
    file_config: &FileConfig,
    overrides: &NetworkArgs,
) -> Result<()> {
    let config = network_config(file_config, overrides)?;
    let georef = file_config.georeference()?;
    let network = build_network(svg, &config)?;

    let collection = network_to_geojson(&network, georef.as_ref())?;
    info!(
        features = collection.features.len(),
        georeferenced = georef.is_some(),
        "exporting network"
    );

    let mut out = output_writer(output)?;
    serde_json::to_writer(&mut out, &collection)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
