use std::io::Write;
use std::path::Path;

use anyhow::Result;
use routemap_core::report::DistanceReport;
use routemap_core::routing::pairwise_distances;

use super::{build_network, network_config, output_writer};
use crate::cli::{NetworkArgs, ReportFormat};
use crate::config::FileConfig;

pub fn run(
    svg: &Path,
    format: ReportFormat,
    file_config: &FileConfig,
    overrides: &NetworkArgs,
) -> Result<()> {
    let config = network_config(file_config, overrides)?;
    let network = build_network(svg, &config)?;

    let distances = pairwise_distances(&network)?;
    let report = DistanceReport::new(&network, distances);

    let mut out = output_writer(None)?;
    match format {
        ReportFormat::Text => report.write_text(&mut out)?,
        ReportFormat::Json => report.write_json(&mut out)?,
        ReportFormat::Csv => report.write_csv(&mut out)?,
    }
    out.flush()?;
    Ok(())
}
