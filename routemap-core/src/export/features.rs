use geo::{Coord, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use petgraph::visit::EdgeRef;
use serde_json::json;

use crate::Error;
use crate::georef::Georeference;
use crate::model::{RoadNetwork, SettlementNode};
use crate::routing::dijkstra::RoadPath;

/// Converts the network to a `GeoJSON` `FeatureCollection`: one `LineString`
/// per graph edge and one `Point` per settlement. Coordinates stay in
/// drawing units unless a georeference is given.
pub fn network_to_geojson(
    network: &RoadNetwork,
    georef: Option<&Georeference>,
) -> Result<FeatureCollection, Error> {
    let graph = &network.graph.graph;
    let mut features = Vec::with_capacity(graph.edge_count() + network.settlements.len());

    for edge in graph.edge_references() {
        let line = LineString::new(vec![
            project(graph[edge.source()].geometry.into(), georef),
            project(graph[edge.target()].geometry.into(), georef),
        ]);

        let value = json!({
            "type": "Feature",
            "geometry": Geometry::new(GeoJsonValue::from(&line)),
            "properties": {
                "kind": edge.weight().kind.as_str(),
                "weight": edge.weight().weight,
                "from_node": edge.source().index(),
                "to_node": edge.target().index(),
            }
        });
        features.push(to_feature(value)?);
    }

    for settlement in &network.settlements {
        features.push(settlement_feature(settlement, georef)?);
    }

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn network_to_geojson_string(
    network: &RoadNetwork,
    georef: Option<&Georeference>,
) -> Result<String, Error> {
    serde_json::to_string(&network_to_geojson(network, georef)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

/// Route between two settlements as a `LineString` through the path's nodes,
/// followed by the two settlement points
pub fn route_to_geojson(
    network: &RoadNetwork,
    path: &RoadPath,
    from: &SettlementNode,
    to: &SettlementNode,
    georef: Option<&Georeference>,
) -> Result<FeatureCollection, Error> {
    let line: LineString<f64> = path
        .to_line_string(&network.graph)
        .coords()
        .map(|&c| project(c, georef))
        .collect();

    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&line)),
        "properties": {
            "from": from.name,
            "to": to.name,
            "distance_km": path.distance(),
            "nodes": path.nodes().len(),
        }
    });

    Ok(FeatureCollection {
        features: vec![
            to_feature(value)?,
            settlement_feature(from, georef)?,
            settlement_feature(to, georef)?,
        ],
        bbox: None,
        foreign_members: None,
    })
}

fn settlement_feature(
    settlement: &SettlementNode,
    georef: Option<&Georeference>,
) -> Result<Feature, Error> {
    let point = Point::from(project(settlement.position.into(), georef));

    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&point)),
        "properties": {
            "name": settlement.name,
            "node": settlement.node,
        }
    });
    to_feature(value)
}

fn project(coord: Coord<f64>, georef: Option<&Georeference>) -> Coord<f64> {
    georef.map_or(coord, |g| g.apply(coord))
}

fn to_feature(value: serde_json::Value) -> Result<Feature, Error> {
    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
