// Re-export key components
pub use crate::config::{EdgePolicy, RouteMapConfig};
pub use crate::export::{network_to_geojson, route_to_geojson};
pub use crate::georef::{ControlPoint, Georeference};
pub use crate::loading::{build_graph, create_road_network, load_road_map, parse_road_map};
pub use crate::model::{RoadGraph, RoadMap, RoadNetwork, Settlement, SettlementNode};
pub use crate::report::{DistanceReport, write_inspection};
pub use crate::routing::{
    SettlementDistance, SettlementRoute, distance_between, pairwise_distances, route_between,
};

// Core types
pub use crate::Distance; // kilometres
pub use crate::Error;
pub use crate::NodeId;
