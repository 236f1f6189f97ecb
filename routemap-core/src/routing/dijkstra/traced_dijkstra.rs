use std::collections::BinaryHeap;

use geo::{Coord, LineString};
use hashbrown::HashMap;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use super::state::State;
use crate::Distance;
use crate::model::RoadGraph;

/// Node sequence of a shortest road path
#[derive(Debug, Clone)]
pub struct RoadPath {
    nodes: Vec<NodeIndex>,
    distance: Distance,
}

impl RoadPath {
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// Length in kilometres
    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Path geometry through the node representatives
    pub fn to_line_string(&self, graph: &RoadGraph) -> LineString<f64> {
        self.nodes
            .iter()
            .filter_map(|&node| graph.graph.node_weight(node))
            .map(|node| Coord::from(node.geometry))
            .collect()
    }
}

/// Dijkstra's algorithm with predecessor tracking.
/// Returns the shortest path from `start` to `target`, or `None` if the
/// target cannot be reached.
pub fn dijkstra_path(graph: &RoadGraph, start: NodeIndex, target: NodeIndex) -> Option<RoadPath> {
    let mut distances: HashMap<NodeIndex, Distance> = HashMap::new();
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut heap = BinaryHeap::new();

    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            break;
        }

        if let Some(&best) = distances.get(&node)
            && cost > best
        {
            continue;
        }

        for edge in graph.edges(node) {
            let next = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            let next_cost = cost + edge.weight().weight;

            let improved = distances.get(&next).is_none_or(|&known| next_cost < known);
            if improved {
                distances.insert(next, next_cost);
                predecessors.insert(next, node);
                heap.push(State {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    let distance = *distances.get(&target)?;

    // Follow predecessors backward from target to start
    let mut nodes = vec![target];
    let mut current = target;
    while current != start {
        current = *predecessors.get(&current)?;
        nodes.push(current);
    }
    nodes.reverse();

    Some(RoadPath { nodes, distance })
}
