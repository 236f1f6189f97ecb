//! Pipeline settings

use serde::{Deserialize, Serialize};

use crate::Error;

/// How a repeated edge between the same two nodes is stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgePolicy {
    /// The most recently offered weight replaces the stored one
    #[default]
    LastWins,
    /// The smaller of the stored and offered weights is kept
    Shortest,
}

/// Settings for one pipeline run.
///
/// Distances are in drawing units unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteMapConfig {
    /// Maximum arc length between two consecutive road samples
    pub sample_step: f64,
    /// Largest gap between two roads still treated as a junction,
    /// also the radius inside which road vertices snap onto the junction
    pub junction_tolerance: f64,
    /// Points closer than this to an existing node reuse that node
    pub merge_tolerance: f64,
    /// Kilometres per drawing unit
    pub scale: f64,
    /// `inkscape:label` of the roads layer
    pub roads_layer: String,
    /// `inkscape:label` of the settlements layer
    pub settlements_layer: String,
    pub edge_policy: EdgePolicy,
}

impl Default for RouteMapConfig {
    fn default() -> Self {
        Self {
            sample_step: 1.0,
            junction_tolerance: 10.0,
            // slightly more than half of the default sample step
            merge_tolerance: 0.7,
            scale: 2.44,
            roads_layer: "roads".to_string(),
            settlements_layer: "settlements".to_string(),
            edge_policy: EdgePolicy::LastWins,
        }
    }
}

impl RouteMapConfig {
    /// Checks that every numeric setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.sample_step.is_finite() && self.sample_step > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "sample_step must be a positive number, got {}",
                self.sample_step
            )));
        }

        for (name, value) in [
            ("junction_tolerance", self.junction_tolerance),
            ("merge_tolerance", self.merge_tolerance),
            ("scale", self.scale),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.roads_layer.is_empty() || self.settlements_layer.is_empty() {
            return Err(Error::InvalidConfig(
                "layer names must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
