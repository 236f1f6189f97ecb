use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No road junction found (closest gap {gap} > {tolerance})")]
    NoJunctionFound { gap: f64, tolerance: f64 },
    #[error("Graph is not fully connected ({components} connected components)")]
    DisconnectedGraph { components: usize },
    #[error("No road path between settlements {from} and {to}")]
    UnreachablePair { from: String, to: String },
    #[error("Unknown settlement: {0}")]
    UnknownSettlement(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Layer not found: {0}")]
    MissingLayer(String),
    #[error("Invalid path data: {0}")]
    PathSyntax(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("XML error: {0}")]
    XmlError(#[from] roxmltree::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
