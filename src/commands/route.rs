use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use routemap_core::export::route_to_geojson;
use routemap_core::routing::route_between;

use super::{build_network, network_config, output_writer};
use crate::cli::NetworkArgs;
use crate::config::FileConfig;

pub fn run(
    svg: &Path,
    from: &str,
    to: &str,
    output: Option<&Path>,
    file_config: &FileConfig,
    overrides: &NetworkArgs,
) -> Result<()> {
    let config = network_config(file_config, overrides)?;
    let network = build_network(svg, &config)?;

    let route = route_between(&network, from, to)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{from} <-> {to}: {:.2} km", route.path.distance())?;

    if let Some(output) = output {
        let georef = file_config.georeference()?;
        let collection =
            route_to_geojson(&network, &route.path, route.from, route.to, georef.as_ref())?;

        let mut out = output_writer(Some(output))?;
        serde_json::to_writer(&mut out, &collection)
            .with_context(|| format!("failed to write {}", output.display()))?;
        out.flush()?;
    }
    Ok(())
}
