//! Planar geometry helpers: curve sampling and junction search

pub mod junction;
pub mod sampling;

use geo::{Coord, Distance, Euclidean, Line, LineString, Point};

pub use junction::{Junction, find_road_junction};
pub use sampling::{CurvePath, SvgPath, sample_path};

/// Euclidean distance between two coordinates in drawing units
pub fn euclidean(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Euclidean.distance(Point::from(a), Point::from(b))
}

pub fn midpoint(a: Coord<f64>, b: Coord<f64>) -> Coord<f64> {
    Coord {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
    }
}

/// Straight pieces of a polyline; a single-vertex polyline yields one
/// zero-length piece so it still takes part in distance queries.
pub(crate) fn segments(polyline: &LineString<f64>) -> Vec<Line<f64>> {
    match polyline.0.as_slice() {
        [] => Vec::new(),
        [only] => vec![Line::new(*only, *only)],
        _ => polyline.lines().collect(),
    }
}
