mod regular_dijkstra;
mod state;
mod traced_dijkstra;

pub use regular_dijkstra::dijkstra_path_weights;
pub use traced_dijkstra::{RoadPath, dijkstra_path};
