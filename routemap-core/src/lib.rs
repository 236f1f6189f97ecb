//! Road network distances for hand-drawn maps
//!
//! Reads the roads and settlements layers of an Inkscape map, turns the road
//! curves into a weighted graph and reports shortest road distances between
//! every pair of settlements.

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod georef;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod report;
pub mod routing;

pub use config::{EdgePolicy, RouteMapConfig};
pub use error::Error;
pub use loading::{build_graph, create_road_network, load_road_map};
pub use model::{RoadGraph, RoadMap, RoadNetwork, Settlement};

/// Graph node identifier handed out by the point registry
pub type NodeId = usize;
/// Physical distance, drawing units multiplied by the map scale
pub type Distance = f64;
