//! GeoJSON output of road networks and routes

mod features;

pub use features::{network_to_geojson, network_to_geojson_string, route_to_geojson};
