use std::path::Path;

use anyhow::{Context, Result};
use routemap_core::RouteMapConfig;
use routemap_core::georef::{ControlPoint, Georeference};
use serde::Deserialize;
use tracing::debug;

/// Contents of the `--config` TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub network: RouteMapConfig,
    pub georeference: Option<GeoreferenceConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeoreferenceConfig {
    pub control_points: Vec<ControlPoint>,
}

impl FileConfig {
    /// Reads `path`, or returns the defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        debug!(?config, "loaded config");
        Ok(config)
    }

    pub fn georeference(&self) -> Result<Option<Georeference>> {
        self.georeference
            .as_ref()
            .map(|g| Georeference::fit(&g.control_points))
            .transpose()
            .context("invalid georeference")
    }
}

#[cfg(test)]
mod tests {
    use routemap_core::EdgePolicy;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [network]
            scale = 1.25
            edge_policy = "shortest"
            "#,
        )
        .unwrap();

        assert_eq!(config.network.scale, 1.25);
        assert_eq!(config.network.edge_policy, EdgePolicy::Shortest);
        assert_eq!(config.network.merge_tolerance, 0.7);
        assert!(config.georeference().unwrap().is_none());
    }

    #[test]
    fn georeference_section_is_fitted() {
        let config: FileConfig = toml::from_str(
            r#"
            [[georeference.control_points]]
            drawing = [495.263, 187.912]
            lonlat = [1.1675, 55.318]

            [[georeference.control_points]]
            drawing = [854.951, 292.844]
            lonlat = [7.457, 53.477]

            [[georeference.control_points]]
            drawing = [276.97, 299.81]
            lonlat = [-2.656, 53.361]
            "#,
        )
        .unwrap();

        assert!(config.georeference().unwrap().is_some());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>("[network]\nstep = 2.0\n").is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = FileConfig::load(Some(Path::new("/nonexistent/routemap.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/routemap.toml"));
    }
}
