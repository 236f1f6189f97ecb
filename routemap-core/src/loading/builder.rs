use geo::{Coord, LineString, Point};
use log::{debug, info};

use super::snapping::{RoadIndex, snap_settlements};
use crate::geometry::{Junction, euclidean, find_road_junction, sample_path};
use crate::model::{EdgeKind, NodeRegistry, RoadGraph, RoadMap, RoadNetwork, Settlement};
use crate::{EdgePolicy, Error, NodeId, RouteMapConfig};

/// Samples the roads of `map`, joins them at their junction and builds
/// the road network
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the map has no roads,
/// the roads do not meet, or the resulting graph is not connected
pub fn create_road_network(map: &RoadMap, config: &RouteMapConfig) -> Result<RoadNetwork, Error> {
    config.validate()?;

    if map.roads.is_empty() {
        return Err(Error::InvalidData("map has no roads".to_string()));
    }

    info!(
        "Sampling {} roads every {} drawing units",
        map.road_count(),
        config.sample_step
    );
    let roads = map
        .roads
        .iter()
        .map(|road| sample_path(road, config.sample_step))
        .collect::<Result<Vec<_>, _>>()?;

    let junction = if roads.len() > 1 {
        Some(find_road_junction(&roads, config.junction_tolerance)?)
    } else {
        info!("Map has a single road, skipping junction detection");
        None
    };

    build_graph(roads, map.settlements(), junction, config)
}

/// Builds the road graph from sampled road polylines.
///
/// 1. road vertices within the junction tolerance of the junction are
///    moved onto it, so every road meeting there shares one node
/// 2. consecutive vertices of each road are linked by road edges
/// 3. each settlement is linked to its nearest point on the unsnapped roads
/// 4. the graph must end up as a single connected component
///
/// # Errors
///
/// Returns [`Error::DisconnectedGraph`] if step 4 fails and
/// [`Error::InvalidData`] if `roads` is empty or a settlement position is
/// not finite
pub fn build_graph(
    roads: Vec<LineString<f64>>,
    settlements: &[Settlement],
    junction: Option<Junction>,
    config: &RouteMapConfig,
) -> Result<RoadNetwork, Error> {
    if roads.is_empty() {
        return Err(Error::InvalidData("no roads to build a graph from".to_string()));
    }
    if let Some(bad) = settlements
        .iter()
        .find(|s| !(s.position.x().is_finite() && s.position.y().is_finite()))
    {
        return Err(Error::InvalidData(format!(
            "settlement '{}' has a non-finite position ({}, {})",
            bad.name,
            bad.position.x(),
            bad.position.y()
        )));
    }

    let mut builder = GraphBuilder::new(config);

    let snapped: Vec<LineString<f64>> = match &junction {
        Some(junction) => roads
            .iter()
            .map(|road| snap_to_junction(road, junction.point, config.junction_tolerance))
            .collect(),
        None => roads.clone(),
    };

    for road in &snapped {
        for line in road.lines() {
            builder.connect(line.start, line.end, EdgeKind::Road);
        }
    }
    debug!(
        "Road backbone has {} nodes and {} edges",
        builder.graph.node_count(),
        builder.graph.edge_count()
    );

    let index = RoadIndex::new(&roads);
    let settlements = snap_settlements(&mut builder, &index, settlements);
    info!(
        "Attached {} settlements, graph has {} nodes and {} edges",
        settlements.len(),
        builder.graph.node_count(),
        builder.graph.edge_count()
    );

    let components = builder.graph.connected_components();
    info!("Connected components: {components}");
    if components != 1 {
        return Err(Error::DisconnectedGraph { components });
    }

    Ok(RoadNetwork {
        graph: builder.graph,
        settlements,
        junction,
        roads,
    })
}

/// Moves every vertex within `tolerance` of `junction` exactly onto it
fn snap_to_junction(road: &LineString<f64>, junction: Coord<f64>, tolerance: f64) -> LineString<f64> {
    road.coords()
        .map(|&c| {
            if euclidean(c, junction) <= tolerance {
                junction
            } else {
                c
            }
        })
        .collect()
}

/// Keeps the point registry and the graph's node indices in step
pub(crate) struct GraphBuilder {
    registry: NodeRegistry,
    pub(crate) graph: RoadGraph,
    scale: f64,
    policy: EdgePolicy,
}

impl GraphBuilder {
    pub(crate) fn new(config: &RouteMapConfig) -> Self {
        Self {
            registry: NodeRegistry::new(config.merge_tolerance),
            graph: RoadGraph::new(),
            scale: config.scale,
            policy: config.edge_policy,
        }
    }

    pub(crate) fn node_for(&mut self, point: Coord<f64>) -> NodeId {
        let id = self.registry.lookup_or_create(point);
        if id == self.graph.node_count() {
            self.graph.add_node(Point::from(point));
        }
        id
    }

    /// Registers `a` then `b` and links their nodes with an edge weighted
    /// by the scaled distance between the two points
    pub(crate) fn connect(&mut self, a: Coord<f64>, b: Coord<f64>, kind: EdgeKind) -> (NodeId, NodeId) {
        let na = self.node_for(a);
        let nb = self.node_for(b);
        self.graph
            .add_edge(na, nb, euclidean(a, b) * self.scale, kind, self.policy);
        (na, nb)
    }
}

#[cfg(test)]
mod tests {
    use geo::{coord, line_string};
    use petgraph::graph::NodeIndex;
    use petgraph::visit::EdgeRef;

    use super::*;
    use crate::geometry::SvgPath;
    use crate::routing::pairwise_distances;

    const SCALE: f64 = 2.44;

    fn config() -> RouteMapConfig {
        RouteMapConfig {
            scale: SCALE,
            ..RouteMapConfig::default()
        }
    }

    fn settlement(name: &str, x: f64, y: f64) -> Settlement {
        Settlement {
            name: name.to_string(),
            position: Point::new(x, y),
        }
    }

    /// Two collinear roads ending 0.3 units apart near (100, 100) and a
    /// settlement 20 units off each road
    fn two_roads() -> (Vec<LineString<f64>>, Vec<Settlement>) {
        let roads = vec![
            line_string![(x: 0.0, y: 100.0), (x: 50.0, y: 100.0), (x: 100.0, y: 100.0)],
            line_string![(x: 100.3, y: 100.0), (x: 150.0, y: 100.0), (x: 200.0, y: 100.0)],
        ];
        let settlements = vec![
            settlement("Ostwald", 50.0, 120.0),
            settlement("Westmark", 150.0, 120.0),
        ];
        (roads, settlements)
    }

    #[test]
    fn end_to_end_two_roads() {
        let (roads, settlements) = two_roads();
        let config = config();

        let junction = find_road_junction(&roads, config.junction_tolerance).unwrap();
        assert!((junction.gap - 0.3).abs() < 1e-9);

        let network = build_graph(roads, &settlements, Some(junction), &config).unwrap();
        assert_eq!(network.component_count(), 1);

        // 0, 50, junction, 150, 200 on the roads plus the two settlements
        assert_eq!(network.graph.node_count(), 7);

        let distances = pairwise_distances(&network).unwrap();
        assert_eq!(distances.len(), 1);

        // connector legs of 20 each plus the backbone between the snap points
        let backbone = (100.15 - 50.0) + (150.0 - 100.15);
        let expected = (20.0 + backbone + 20.0) * SCALE;
        assert_eq!(distances[0].from, "Ostwald");
        assert_eq!(distances[0].to, "Westmark");
        assert!((distances[0].distance_km - expected).abs() < 1e-9);
    }

    #[test]
    fn vertices_near_the_junction_share_one_node() {
        let (roads, settlements) = two_roads();
        let config = config();
        let junction = find_road_junction(&roads, config.junction_tolerance).unwrap();

        let network = build_graph(roads, &settlements, Some(junction), &config).unwrap();

        let junction_nodes: Vec<_> = network
            .graph
            .graph
            .node_indices()
            .filter(|&n| {
                let p = network.graph.graph[n].geometry;
                euclidean(p.into(), junction.point) < 1e-12
            })
            .collect();
        assert_eq!(junction_nodes.len(), 1);
        assert_eq!(network.graph.graph.edges(junction_nodes[0]).count(), 2);
    }

    #[test]
    fn settlements_reuse_existing_road_nodes() {
        let (roads, settlements) = two_roads();
        let config = config();
        let junction = find_road_junction(&roads, config.junction_tolerance).unwrap();
        let network = build_graph(roads, &settlements, Some(junction), &config).unwrap();

        let ostwald = network.settlement("Ostwald").unwrap();
        assert_eq!(ostwald.road_point, Point::new(50.0, 100.0));
        assert_eq!(network.graph.node_geometry(ostwald.node), Some(Point::new(50.0, 120.0)));

        let edges: Vec<_> = network.graph.edges(NodeIndex::new(ostwald.node)).collect();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].weight().kind, EdgeKind::Connector);
        assert!((edges[0].weight().weight - 20.0 * SCALE).abs() < 1e-9);
    }

    #[test]
    fn building_twice_gives_the_same_graph() {
        let config = config();
        let build = || {
            let (roads, settlements) = two_roads();
            let junction = find_road_junction(&roads, config.junction_tolerance).unwrap();
            build_graph(roads, &settlements, Some(junction), &config).unwrap()
        };

        let first = build();
        let second = build();
        assert_eq!(first.graph.node_count(), second.graph.node_count());
        assert_eq!(first.graph.edge_count(), second.graph.edge_count());
        assert_eq!(first.component_count(), second.component_count());
        for (a, b) in first.settlements.iter().zip(&second.settlements) {
            assert_eq!(a.node, b.node);
        }
    }

    #[test]
    fn disconnected_roads_are_rejected() {
        let roads = vec![
            line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)],
            line_string![(x: 0.0, y: 50.0), (x: 10.0, y: 50.0)],
        ];
        let settlements = vec![settlement("Nuln", 10.0, 1.0)];

        match build_graph(roads, &settlements, None, &config()) {
            Err(Error::DisconnectedGraph { components }) => assert_eq!(components, 2),
            other => panic!("expected DisconnectedGraph, got {other:?}"),
        }
    }

    #[test]
    fn settlement_on_a_road_vertex_still_connects() {
        let roads = vec![line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)]];
        let settlements = vec![settlement("Ubersreik", 10.0, 0.0), settlement("Grunburg", 0.0, 0.0)];

        let network = build_graph(roads, &settlements, None, &config()).unwrap();
        assert_eq!(network.graph.node_count(), 2);

        let distances = pairwise_distances(&network).unwrap();
        assert!((distances[0].distance_km - 10.0 * SCALE).abs() < 1e-9);
    }

    #[test]
    fn no_roads_is_invalid() {
        assert!(matches!(
            build_graph(Vec::new(), &[], None, &config()),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn non_finite_settlement_is_invalid() {
        let roads = vec![line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)]];
        let settlements = vec![settlement("Grunburg", 0.0, 0.0), settlement("Kemperbad", f64::NAN, 5.0)];

        match build_graph(roads, &settlements, None, &config()) {
            Err(Error::InvalidData(message)) => assert!(message.contains("Kemperbad"), "{message}"),
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }

    #[test]
    fn pipeline_from_svg_paths() {
        let mut map = RoadMap::new();
        map.add_road(SvgPath::parse("M 0 100 H 100").unwrap());
        map.add_road(SvgPath::parse("M 100 100 H 200").unwrap());
        map.insert_settlement("Ostwald", Point::new(50.0, 120.0));
        map.insert_settlement("Westmark", Point::new(150.0, 120.0));

        // 101 samples per road, one unit apart
        let config = RouteMapConfig {
            sample_step: 0.995,
            ..config()
        };
        let network = create_road_network(&map, &config).unwrap();
        assert_eq!(network.component_count(), 1);
        assert_eq!(network.roads[0].0.len(), 101);
        assert!(network.junction.is_some());

        let distances = pairwise_distances(&network).unwrap();
        // samples near the junction collapse onto it, the backbone still
        // runs straight from one snap point to the other
        let expected = (20.0 + 100.0 + 20.0) * SCALE;
        assert!((distances[0].distance_km - expected).abs() < 1e-6);
    }

    #[test]
    fn pipeline_fails_when_roads_do_not_meet() {
        let mut map = RoadMap::new();
        map.add_road(SvgPath::parse("M 0 0 H 100").unwrap());
        map.add_road(SvgPath::parse("M 150 0 H 250").unwrap());

        match create_road_network(&map, &config()) {
            Err(Error::NoJunctionFound { gap, tolerance }) => {
                assert!((gap - 50.0).abs() < 1e-9);
                assert_eq!(tolerance, 10.0);
            }
            other => panic!("expected NoJunctionFound, got {other:?}"),
        }
    }

    #[test]
    fn single_road_skips_junction_detection() {
        let mut map = RoadMap::new();
        map.add_road(SvgPath::parse("M 0 0 L 30 40").unwrap());
        map.insert_settlement("Wurtbad", Point::new(0.0, 0.0));
        map.insert_settlement("Talabheim", Point::new(30.0, 40.0));

        let network = create_road_network(&map, &config()).unwrap();
        assert!(network.junction.is_none());

        let distances = pairwise_distances(&network).unwrap();
        assert!((distances[0].distance_km - 50.0 * SCALE).abs() < 1e-6);
    }

    #[test]
    fn snapping_moves_only_nearby_vertices() {
        let road = line_string![(x: 0.0, y: 0.0), (x: 5.0, y: 0.0), (x: 20.0, y: 0.0)];
        let snapped = snap_to_junction(&road, coord! { x: 4.0, y: 0.0 }, 1.0);
        assert_eq!(snapped.0[1], coord! { x: 4.0, y: 0.0 });
        assert_eq!(snapped.0[0], coord! { x: 0.0, y: 0.0 });
        assert_eq!(snapped.0[2], coord! { x: 20.0, y: 0.0 });
    }
}
