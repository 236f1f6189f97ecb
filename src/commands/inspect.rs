use std::io::Write;
use std::path::Path;

use anyhow::Result;
use routemap_core::report::write_inspection;

use super::{load_map, network_config, output_writer};
use crate::cli::NetworkArgs;
use crate::config::FileConfig;

pub fn run(svg: &Path, file_config: &FileConfig, overrides: &NetworkArgs) -> Result<()> {
    let config = network_config(file_config, overrides)?;
    let map = load_map(svg, &config)?;

    let mut out = output_writer(None)?;
    write_inspection(&mut out, &map, config.sample_step)?;
    out.flush()?;
    Ok(())
}
