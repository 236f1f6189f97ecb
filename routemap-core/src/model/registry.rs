//! Point deduplication registry
//!
//! Hands out node ids for points. A point reuses the lowest-numbered
//! existing node whose representative lies within the tolerance; otherwise
//! it becomes the representative of a new node. Representatives are never
//! moved, so clustering is greedy and depends on registration order: with
//! A, B, C where only A-B and B-C are within tolerance, registering A then C
//! then B gives two nodes and B joins A.

use geo::Coord;
use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::NodeId;
use crate::geometry::euclidean;

type IndexedRepresentative = GeomWithData<[f64; 2], NodeId>;

/// Relative slack on the R-tree search radius; candidates are re-checked
/// with the exact Euclidean distance.
const SEARCH_SLACK: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct NodeRegistry {
    tolerance: f64,
    /// Representative point of each node, indexed by id
    representatives: Vec<Coord<f64>>,
    index: RTree<IndexedRepresentative>,
}

impl NodeRegistry {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            representatives: Vec::new(),
            index: RTree::new(),
        }
    }

    /// Returns the node for `point`, creating one if no representative is
    /// within tolerance.
    pub fn lookup_or_create(&mut self, point: Coord<f64>) -> NodeId {
        if let Some(id) = self.lookup(point) {
            return id;
        }

        let id = self.representatives.len();
        self.representatives.push(point);
        self.index
            .insert(IndexedRepresentative::new([point.x, point.y], id));
        id
    }

    /// Lowest-numbered node whose representative is within tolerance of
    /// `point`, without registering anything.
    pub fn lookup(&self, point: Coord<f64>) -> Option<NodeId> {
        let radius = self.tolerance * (1.0 + SEARCH_SLACK) + f64::EPSILON;

        self.index
            .locate_within_distance([point.x, point.y], radius * radius)
            .map(|candidate| candidate.data)
            .filter(|&id| euclidean(self.representatives[id], point) <= self.tolerance)
            .min()
    }

    pub fn representative(&self, id: NodeId) -> Option<Coord<f64>> {
        self.representatives.get(id).copied()
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }
}
