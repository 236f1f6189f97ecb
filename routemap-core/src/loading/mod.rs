//! This module reads Inkscape maps and builds the road network from
//! their roads and settlements.

mod builder;
mod snapping;
pub mod svg;

pub use builder::{build_graph, create_road_network};
pub use snapping::RoadIndex;
pub use svg::{load_road_map, parse_road_map};
