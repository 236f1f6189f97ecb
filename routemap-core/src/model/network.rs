use geo::Point;
use petgraph::Undirected;
use petgraph::graph::{Edges, NodeIndex, UnGraph};

use super::components::{EdgeKind, RoadEdge, RoadNode};
use crate::{Distance, EdgePolicy, NodeId};

/// Undirected road graph. Node indices equal the registry's node ids.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    pub graph: UnGraph<RoadNode, RoadEdge>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, geometry: Point<f64>) -> NodeId {
        self.graph.add_node(RoadNode { geometry }).index()
    }

    /// Connects `a` and `b`. An existing edge between the same nodes is
    /// updated according to `policy`. Self-loops are not stored since they
    /// never shorten a path; returns `false` for them.
    pub fn add_edge(
        &mut self,
        a: NodeId,
        b: NodeId,
        weight: Distance,
        kind: EdgeKind,
        policy: EdgePolicy,
    ) -> bool {
        if a == b {
            return false;
        }

        let (a, b) = (NodeIndex::new(a), NodeIndex::new(b));
        match self.graph.find_edge(a, b) {
            Some(existing) => {
                let edge = &mut self.graph[existing];
                match policy {
                    EdgePolicy::LastWins => {
                        edge.weight = weight;
                        edge.kind = kind;
                    }
                    EdgePolicy::Shortest => {
                        if weight < edge.weight {
                            edge.weight = weight;
                            edge.kind = kind;
                        }
                    }
                }
            }
            None => {
                self.graph.add_edge(a, b, RoadEdge { weight, kind });
            }
        }
        true
    }

    pub fn edges(&self, node: NodeIndex) -> Edges<'_, RoadEdge, Undirected> {
        self.graph.edges(node)
    }

    pub fn node_geometry(&self, node: NodeId) -> Option<Point<f64>> {
        self.graph
            .node_weight(NodeIndex::new(node))
            .map(|node| node.geometry)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of connected components, isolated nodes included
    pub fn connected_components(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }
}
