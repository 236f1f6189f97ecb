//! Shortest road distances between settlements

pub mod dijkstra;
pub mod pairwise;

pub use pairwise::{
    SettlementDistance, SettlementRoute, distance_between, pairwise_distances, route_between,
};
