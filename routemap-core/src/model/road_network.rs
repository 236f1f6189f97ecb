use geo::LineString;

use super::{RoadGraph, SettlementNode};
use crate::geometry::Junction;

/// Road graph together with the settlements snapped onto it
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    pub graph: RoadGraph,
    /// Settlements in source order
    pub settlements: Vec<SettlementNode>,
    /// Junction the roads were forced through, if there was more than one road
    pub junction: Option<Junction>,
    /// Sampled road polylines before junction snapping
    pub roads: Vec<LineString<f64>>,
}

impl RoadNetwork {
    pub fn settlement(&self, name: &str) -> Option<&SettlementNode> {
        self.settlements.iter().find(|s| s.name == name)
    }

    pub fn settlement_count(&self) -> usize {
        self.settlements.len()
    }

    pub fn component_count(&self) -> usize {
        self.graph.connected_components()
    }
}
