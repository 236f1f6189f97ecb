//! Road graph components - nodes, edges and snapped settlements

use geo::Point;

use crate::{Distance, NodeId};

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Representative point of the node in drawing units
    pub geometry: Point<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Piece of a road polyline
    Road,
    /// Link from a settlement to its nearest road point
    Connector,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Road => "road",
            Self::Connector => "connector",
        }
    }
}

/// Road graph edge
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Length in kilometres
    pub weight: Distance,
    pub kind: EdgeKind,
}

/// Settlement attached to the road graph
#[derive(Debug, Clone)]
pub struct SettlementNode {
    pub name: String,
    /// Position of the settlement marker
    pub position: Point<f64>,
    /// Nearest point on any road
    pub road_point: Point<f64>,
    /// Node registered for the settlement position
    pub node: NodeId,
}
