//! Junction detection between road polylines

use geo::line_intersection::{LineIntersection, line_intersection};
use geo::{Closest, ClosestPoint, Coord, Line, LineString, Point};
use log::info;

use super::{euclidean, midpoint, segments};
use crate::Error;

/// Point where the roads are deemed to meet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Junction {
    /// Midpoint of the closest approach between two roads
    pub point: Coord<f64>,
    /// Length of that closest approach in drawing units
    pub gap: f64,
    /// Indices of the two roads involved
    pub roads: (usize, usize),
}

/// Finds the closest approach between any two distinct roads and returns
/// its midpoint as the junction.
///
/// # Errors
///
/// Returns [`Error::NoJunctionFound`] if the smallest gap exceeds `tolerance`,
/// or if fewer than two roads are given (the gap is then infinite).
pub fn find_road_junction(
    roads: &[LineString<f64>],
    tolerance: f64,
) -> Result<Junction, Error> {
    let road_segments: Vec<Vec<Line<f64>>> = roads.iter().map(segments).collect();

    let mut best: Option<Junction> = None;
    for i in 0..road_segments.len() {
        for j in (i + 1)..road_segments.len() {
            let Some((a, b)) = closest_points(&road_segments[i], &road_segments[j]) else {
                continue;
            };
            let gap = euclidean(a, b);
            if best.is_none_or(|current| gap < current.gap) {
                best = Some(Junction {
                    point: midpoint(a, b),
                    gap,
                    roads: (i, j),
                });
            }
        }
    }

    let gap = best.map_or(f64::INFINITY, |junction| junction.gap);
    info!("Best junction gap found: {gap:.4} (tolerance: {tolerance})");

    match best {
        Some(junction) if junction.gap <= tolerance => Ok(junction),
        _ => Err(Error::NoJunctionFound { gap, tolerance }),
    }
}

/// Closest pair of points between two polylines, the first point lying on
/// `a` and the second on `b`.
fn closest_points(a: &[Line<f64>], b: &[Line<f64>]) -> Option<(Coord<f64>, Coord<f64>)> {
    let mut best: Option<(f64, Coord<f64>, Coord<f64>)> = None;

    for seg_a in a {
        for seg_b in b {
            let (pa, pb) = closest_between_segments(*seg_a, *seg_b);
            let d = euclidean(pa, pb);
            if best.is_none_or(|(current, _, _)| d < current) {
                best = Some((d, pa, pb));
            }
        }
    }

    best.map(|(_, pa, pb)| (pa, pb))
}

fn closest_between_segments(a: Line<f64>, b: Line<f64>) -> (Coord<f64>, Coord<f64>) {
    match line_intersection(a, b) {
        Some(LineIntersection::SinglePoint { intersection, .. }) => {
            return (intersection, intersection);
        }
        Some(LineIntersection::Collinear { intersection }) => {
            return (intersection.start, intersection.start);
        }
        None => {}
    }

    // Disjoint segments are closest at an endpoint of one of them
    let candidates = [
        (a.start, closest_on_segment(b, a.start)),
        (a.end, closest_on_segment(b, a.end)),
        (closest_on_segment(a, b.start), b.start),
        (closest_on_segment(a, b.end), b.end),
    ];

    candidates
        .into_iter()
        .min_by(|x, y| euclidean(x.0, x.1).total_cmp(&euclidean(y.0, y.1)))
        .unwrap_or((a.start, b.start))
}

/// Closest point on `line` to `point`
pub(crate) fn closest_on_segment(line: Line<f64>, point: Coord<f64>) -> Coord<f64> {
    match line.closest_point(&Point::from(point)) {
        Closest::Intersection(p) | Closest::SinglePoint(p) => p.into(),
        Closest::Indeterminate => line.start,
    }
}
