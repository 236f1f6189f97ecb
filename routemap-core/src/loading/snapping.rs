use geo::{Coord, Line, LineString, Point};
use log::trace;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use super::builder::GraphBuilder;
use crate::geometry::euclidean;
use crate::geometry::junction::closest_on_segment;
use crate::model::{EdgeKind, Settlement, SettlementNode};

/// Straight road piece stored in the spatial index
#[derive(Debug, Clone, Copy)]
struct RoadSegment {
    line: Line<f64>,
    road: usize,
}

impl RTreeObject for RoadSegment {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.line.start.x, self.line.start.y],
            [self.line.end.x, self.line.end.y],
        )
    }
}

impl PointDistance for RoadSegment {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let point = Coord {
            x: point[0],
            y: point[1],
        };
        let d = euclidean(closest_on_segment(self.line, point), point);
        d * d
    }
}

/// Spatial index over the union of all road polylines
pub struct RoadIndex {
    tree: RTree<RoadSegment>,
}

impl RoadIndex {
    pub fn new(roads: &[LineString<f64>]) -> Self {
        let segments = roads
            .iter()
            .enumerate()
            .flat_map(|(road, line)| {
                crate::geometry::segments(line)
                    .into_iter()
                    .map(move |line| RoadSegment { line, road })
            })
            .collect();

        Self {
            tree: RTree::bulk_load(segments),
        }
    }

    /// Nearest point on any road to `point`, with the index of that road
    pub fn nearest_point(&self, point: Coord<f64>) -> Option<(Coord<f64>, usize)> {
        self.tree
            .nearest_neighbor(&[point.x, point.y])
            .map(|segment| (closest_on_segment(segment.line, point), segment.road))
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

/// Connects every settlement to its nearest road point. The road point is
/// registered before the settlement position.
pub(super) fn snap_settlements(
    builder: &mut GraphBuilder,
    index: &RoadIndex,
    settlements: &[Settlement],
) -> Vec<SettlementNode> {
    settlements
        .iter()
        .filter_map(|settlement| {
            let position: Coord<f64> = settlement.position.into();
            let Some((road_point, road)) = index.nearest_point(position) else {
                trace!("No road to snap {} onto", settlement.name);
                return None;
            };

            let (_, node) = builder.connect(road_point, position, EdgeKind::Connector);
            trace!(
                "Settlement {} snapped to road {road} at ({:.3}, {:.3}), {:.3} units away",
                settlement.name,
                road_point.x,
                road_point.y,
                euclidean(road_point, position)
            );

            Some(SettlementNode {
                name: settlement.name.clone(),
                position: settlement.position,
                road_point: Point::from(road_point),
                node,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::{coord, line_string};

    use super::*;

    #[test]
    fn finds_nearest_point_on_segment_interior() {
        let roads = vec![
            line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)],
            line_string![(x: 0.0, y: 20.0), (x: 10.0, y: 20.0)],
        ];
        let index = RoadIndex::new(&roads);

        let (point, road) = index.nearest_point(coord! { x: 4.0, y: 3.0 }).unwrap();
        assert_eq!(road, 0);
        assert!(euclidean(point, coord! { x: 4.0, y: 0.0 }) < 1e-12);

        let (point, road) = index.nearest_point(coord! { x: 7.0, y: 18.0 }).unwrap();
        assert_eq!(road, 1);
        assert!(euclidean(point, coord! { x: 7.0, y: 20.0 }) < 1e-12);
    }

    #[test]
    fn nearest_point_beyond_the_end_is_the_endpoint() {
        let roads = vec![line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)]];
        let index = RoadIndex::new(&roads);

        let (point, _) = index.nearest_point(coord! { x: 15.0, y: 5.0 }).unwrap();
        assert_eq!(point, coord! { x: 10.0, y: 0.0 });
    }

    #[test]
    fn empty_index_has_no_nearest_point() {
        let index = RoadIndex::new(&[]);
        assert!(index.is_empty());
        assert!(index.nearest_point(coord! { x: 0.0, y: 0.0 }).is_none());
    }
}
