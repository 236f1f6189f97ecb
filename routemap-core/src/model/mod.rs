//! Data model for road network distances
//!
//! Contains the source map, the point registry and the road graph built
//! from them.

pub mod components;
pub mod map;
pub mod network;
pub mod registry;
pub mod road_network;

pub use components::{EdgeKind, RoadEdge, RoadNode, SettlementNode};
pub use map::{RoadMap, RoadSummary, Settlement};
pub use network::RoadGraph;
pub use registry::NodeRegistry;
pub use road_network::RoadNetwork;
