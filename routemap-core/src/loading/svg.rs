//! Inkscape SVG map reading
//!
//! Roads are the `path` elements of the roads layer. Settlements are the
//! `text` elements of the settlements layer, named by their first `tspan`
//! and placed at the text anchor (`x`, `y`).

use std::path::Path;

use geo::Point;
use log::{debug, info};
use roxmltree::{Document, Node, ParsingOptions};

use crate::geometry::{CurvePath, SvgPath};
use crate::model::RoadMap;
use crate::{Error, RouteMapConfig};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";

/// Reads the roads and settlements of an Inkscape map
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a usable map
pub fn load_road_map(path: &Path, config: &RouteMapConfig) -> Result<RoadMap, Error> {
    info!("Reading map {}", path.display());
    let text = std::fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    parse_road_map(&text, config)
}

/// Parses map contents already in memory
///
/// # Errors
///
/// Returns an error for malformed XML, a missing layer, unparsable path data
/// or settlement text without a position
pub fn parse_road_map(text: &str, config: &RouteMapConfig) -> Result<RoadMap, Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(text, options)?;

    let mut map = RoadMap::new();

    let roads_layer = find_layer(&document, &config.roads_layer)?;
    for path in roads_layer
        .descendants()
        .filter(|n| n.has_tag_name((SVG_NS, "path")))
    {
        let data = path.attribute("d").ok_or_else(|| {
            Error::InvalidData(format!(
                "path {} in layer '{}' has no 'd' attribute",
                element_id(path),
                config.roads_layer
            ))
        })?;
        let road = SvgPath::parse(data)?;
        debug!("Road {} has length {:.2}", element_id(path), road.length());
        map.add_road(road);
    }

    let settlements_layer = find_layer(&document, &config.settlements_layer)?;
    for label in settlements_layer
        .descendants()
        .filter(|n| n.has_tag_name((SVG_NS, "text")))
    {
        let Some(name) = settlement_name(label) else {
            debug!("Skipping text {} without a name", element_id(label));
            continue;
        };
        let x = coordinate(label, "x", name)?;
        let y = coordinate(label, "y", name)?;
        map.insert_settlement(name, Point::new(x, y));
    }

    info!(
        "Found {} roads and {} settlements",
        map.road_count(),
        map.settlement_count()
    );
    Ok(map)
}

/// First group labelled `label`, in document order
fn find_layer<'a, 'input>(
    document: &'a Document<'input>,
    label: &str,
) -> Result<Node<'a, 'input>, Error> {
    document
        .descendants()
        .find(|n| n.has_tag_name((SVG_NS, "g")) && n.attribute((INKSCAPE_NS, "label")) == Some(label))
        .ok_or_else(|| Error::MissingLayer(label.to_string()))
}

/// Trimmed text of the first `tspan`, if it has any
fn settlement_name<'a>(text: Node<'a, '_>) -> Option<&'a str> {
    text.descendants()
        .find(|n| n.has_tag_name((SVG_NS, "tspan")))
        .and_then(|tspan| tspan.text())
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

fn coordinate(text: Node<'_, '_>, attribute: &str, name: &str) -> Result<f64, Error> {
    let value = text.attribute(attribute).ok_or_else(|| {
        Error::InvalidData(format!("settlement '{name}' has no '{attribute}' attribute"))
    })?;
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::InvalidData(format!(
            "settlement '{name}' has a non-numeric '{attribute}' attribute: {value}"
        ))),
    }
}

fn element_id(node: Node<'_, '_>) -> String {
    node.attribute("id")
        .map_or_else(|| format!("at byte {}", node.range().start), |id| format!("'{id}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
     width="300" height="200">
  <g inkscape:groupmode="layer" inkscape:label="roads" id="layer1">
    <path id="road-a" d="M 0,100 H 100" />
    <g id="nested">
      <path id="road-b" d="m 100,100 c 20,0 40,0 100,0" />
    </g>
  </g>
  <g inkscape:groupmode="layer" inkscape:label="settlements" id="layer2">
    <text x="50" y="120"><tspan>  Ostwald </tspan></text>
    <text x="150" y="120"><tspan>Westmark</tspan></text>
    <text x="10" y="10"><tspan></tspan></text>
    <text x="12" y="12">Unlabelled</text>
  </g>
</svg>"#;

    #[test]
    fn reads_roads_and_settlements() {
        let map = parse_road_map(MAP, &RouteMapConfig::default()).unwrap();

        assert_eq!(map.road_count(), 2);
        let names: Vec<_> = map.settlements().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Ostwald", "Westmark"]);
        assert_eq!(map.settlements()[0].position, Point::new(50.0, 120.0));
    }

    #[test]
    fn layer_names_come_from_config() {
        let config = RouteMapConfig {
            roads_layer: "highways".to_string(),
            ..RouteMapConfig::default()
        };
        match parse_road_map(MAP, &config) {
            Err(Error::MissingLayer(label)) => assert_eq!(label, "highways"),
            other => panic!("expected MissingLayer, got {other:?}"),
        }
    }

    #[test]
    fn settlement_without_position_fails() {
        let map = MAP.replace(r#"<text x="150" y="120">"#, r#"<text y="120">"#);
        let err = parse_road_map(&map, &RouteMapConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Westmark"));
    }

    #[test]
    fn non_finite_position_fails() {
        for value in ["NaN", "inf", "-infinity"] {
            let map = MAP.replace(
                r#"<text x="150" y="120">"#,
                &format!(r#"<text x="{value}" y="120">"#),
            );
            match parse_road_map(&map, &RouteMapConfig::default()) {
                Err(Error::InvalidData(message)) => {
                    assert!(message.contains("Westmark"), "{message}");
                    assert!(message.contains("'x'"), "{message}");
                }
                other => panic!("expected InvalidData for x={value}, got {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_path_fails() {
        let map = MAP.replace("M 0,100 H 100", "M 0,100 Q");
        assert!(matches!(
            parse_road_map(&map, &RouteMapConfig::default()),
            Err(Error::PathSyntax(_))
        ));
    }

    #[test]
    fn malformed_xml_fails() {
        assert!(matches!(
            parse_road_map("<svg><g>", &RouteMapConfig::default()),
            Err(Error::XmlError(_))
        ));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_road_map(Path::new("/nonexistent/map.svg"), &RouteMapConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/map.svg"));
    }
}
