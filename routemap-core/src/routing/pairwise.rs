use itertools::Itertools;
use log::{error, info};
use petgraph::graph::NodeIndex;
use rayon::prelude::*;
use serde::Serialize;

use super::dijkstra::{RoadPath, dijkstra_path, dijkstra_path_weights};
use crate::model::{RoadNetwork, SettlementNode};
use crate::{Distance, Error};

/// Road distance between two settlements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementDistance {
    pub from: String,
    pub to: String,
    pub distance_km: Distance,
}

/// Shortest road distance for every unordered pair of settlements, in
/// settlement order (first with second, first with third, ...)
///
/// # Errors
///
/// Returns [`Error::UnreachablePair`] if some pair has no connecting path,
/// which cannot happen for a network that passed the connectivity check
pub fn pairwise_distances(network: &RoadNetwork) -> Result<Vec<SettlementDistance>, Error> {
    let settlements = &network.settlements;
    info!(
        "Calculating road distances between {} settlements",
        settlements.len()
    );

    // One search per source; the last settlement is only ever a target
    let sources = settlements.len().saturating_sub(1);
    let tables: Vec<_> = settlements[..sources]
        .par_iter()
        .map(|source| dijkstra_path_weights(&network.graph, NodeIndex::new(source.node), None))
        .collect();

    (0..settlements.len())
        .tuple_combinations()
        .map(|(i, j)| {
            let (from, to) = (&settlements[i], &settlements[j]);
            match tables[i].get(&NodeIndex::new(to.node)) {
                Some(&distance_km) => Ok(SettlementDistance {
                    from: from.name.clone(),
                    to: to.name.clone(),
                    distance_km,
                }),
                None => {
                    error!(
                        "No path between {} and {} in a connected graph",
                        from.name, to.name
                    );
                    Err(Error::UnreachablePair {
                        from: from.name.clone(),
                        to: to.name.clone(),
                    })
                }
            }
        })
        .collect()
}

/// Shortest road path between two settlements, with both endpoints
#[derive(Debug, Clone)]
pub struct SettlementRoute<'a> {
    pub from: &'a SettlementNode,
    pub to: &'a SettlementNode,
    pub path: RoadPath,
}

/// Resolves two settlement names and finds the shortest road path between
/// them
///
/// # Errors
///
/// Returns [`Error::UnknownSettlement`] for a name not in the network and
/// [`Error::UnreachablePair`] if the two are not connected
pub fn route_between<'a>(
    network: &'a RoadNetwork,
    from: &str,
    to: &str,
) -> Result<SettlementRoute<'a>, Error> {
    let source = network
        .settlement(from)
        .ok_or_else(|| Error::UnknownSettlement(from.to_string()))?;
    let target = network
        .settlement(to)
        .ok_or_else(|| Error::UnknownSettlement(to.to_string()))?;

    let path = dijkstra_path(
        &network.graph,
        NodeIndex::new(source.node),
        NodeIndex::new(target.node),
    )
    .ok_or_else(|| Error::UnreachablePair {
        from: from.to_string(),
        to: to.to_string(),
    })?;

    Ok(SettlementRoute {
        from: source,
        to: target,
        path,
    })
}

/// Shortest road path between two named settlements
///
/// # Errors
///
/// Same as [`route_between`]
pub fn distance_between(network: &RoadNetwork, from: &str, to: &str) -> Result<RoadPath, Error> {
    route_between(network, from, to).map(|route| route.path)
}

#[cfg(test)]
mod tests {
    use geo::{Point, line_string};

    use super::*;
    use crate::model::{RoadGraph, Settlement};
    use crate::{RouteMapConfig, build_graph};

    fn settlement(name: &str, x: f64, y: f64) -> Settlement {
        Settlement {
            name: name.to_string(),
            position: Point::new(x, y),
        }
    }

    /// A 30 x 40 road triangle corner with settlements at its three vertices
    fn corner_network() -> RoadNetwork {
        let roads = vec![line_string![
            (x: 0.0, y: 40.0),
            (x: 0.0, y: 0.0),
            (x: 30.0, y: 0.0),
        ]];
        let settlements = vec![
            settlement("Altdorf", 0.0, 40.0),
            settlement("Nuln", 0.0, 0.0),
            settlement("Marienburg", 30.0, 0.0),
        ];
        let config = RouteMapConfig {
            scale: 1.0,
            ..RouteMapConfig::default()
        };
        build_graph(roads, &settlements, None, &config).unwrap()
    }

    #[test]
    fn every_unordered_pair_in_order() {
        let distances = pairwise_distances(&corner_network()).unwrap();

        let pairs: Vec<_> = distances
            .iter()
            .map(|d| (d.from.as_str(), d.to.as_str(), d.distance_km))
            .collect();
        assert_eq!(
            pairs,
            [
                ("Altdorf", "Nuln", 40.0),
                ("Altdorf", "Marienburg", 70.0),
                ("Nuln", "Marienburg", 30.0),
            ]
        );
    }

    #[test]
    fn fewer_than_two_settlements_give_no_pairs() {
        let mut network = corner_network();
        network.settlements.truncate(1);
        assert!(pairwise_distances(&network).unwrap().is_empty());

        network.settlements.clear();
        assert!(pairwise_distances(&network).unwrap().is_empty());
    }

    #[test]
    fn unreachable_pair_is_reported() {
        let mut graph = RoadGraph::new();
        graph.add_node(Point::new(0.0, 0.0));
        graph.add_node(Point::new(5.0, 0.0));

        let node = |name: &str, id| SettlementNode {
            name: name.to_string(),
            position: Point::new(0.0, 0.0),
            road_point: Point::new(0.0, 0.0),
            node: id,
        };
        let network = RoadNetwork {
            graph,
            settlements: vec![node("Averheim", 0), node("Wissenburg", 1)],
            junction: None,
            roads: Vec::new(),
        };

        match pairwise_distances(&network) {
            Err(Error::UnreachablePair { from, to }) => {
                assert_eq!(from, "Averheim");
                assert_eq!(to, "Wissenburg");
            }
            other => panic!("expected UnreachablePair, got {other:?}"),
        }
    }

    #[test]
    fn distance_between_named_settlements() {
        let network = corner_network();

        let path = distance_between(&network, "Marienburg", "Altdorf").unwrap();
        assert_eq!(path.distance(), 70.0);
        assert_eq!(path.nodes().len(), 3);

        assert!(matches!(
            distance_between(&network, "Altdorf", "Praag"),
            Err(Error::UnknownSettlement(name)) if name == "Praag"
        ));
    }

    #[test]
    fn route_between_resolves_both_settlements() {
        let network = corner_network();

        let route = route_between(&network, "Nuln", "Marienburg").unwrap();
        assert_eq!(route.from.name, "Nuln");
        assert_eq!(route.to.name, "Marienburg");
        assert_eq!(route.path.nodes().first(), Some(&NodeIndex::new(route.from.node)));
        assert_eq!(route.path.nodes().last(), Some(&NodeIndex::new(route.to.node)));
        assert_eq!(route.path.distance(), 30.0);

        assert!(matches!(
            route_between(&network, "Praag", "Nuln"),
            Err(Error::UnknownSettlement(name)) if name == "Praag"
        ));
    }
}
