//! Source map contents: road curves and settlement markers

use geo::Point;

use crate::geometry::sampling::sample_count;
use crate::geometry::{CurvePath, SvgPath};

/// Named settlement marker in drawing coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub name: String,
    pub position: Point<f64>,
}

/// Roads and settlements read from one map document
#[derive(Debug, Clone, Default)]
pub struct RoadMap {
    pub roads: Vec<SvgPath>,
    settlements: Vec<Settlement>,
}

impl RoadMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_road(&mut self, road: SvgPath) {
        self.roads.push(road);
    }

    /// Adds a settlement. A name seen before keeps its place in the order
    /// but takes the new position.
    pub fn insert_settlement(&mut self, name: impl Into<String>, position: Point<f64>) {
        let name = name.into();
        if let Some(existing) = self.settlements.iter_mut().find(|s| s.name == name) {
            log::debug!(
                "Settlement {name} appears more than once, moving it to ({}, {})",
                position.x(),
                position.y()
            );
            existing.position = position;
        } else {
            self.settlements.push(Settlement { name, position });
        }
    }

    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    pub fn settlement_count(&self) -> usize {
        self.settlements.len()
    }

    /// Endpoints, lengths and sample counts of every road
    pub fn road_summaries(&self, sample_step: f64) -> Vec<RoadSummary> {
        self.roads
            .iter()
            .enumerate()
            .map(|(index, road)| {
                let length = road.length();
                RoadSummary {
                    index,
                    start: road.start().into(),
                    end: road.end().into(),
                    length,
                    segments: road.segment_count(),
                    samples: sample_count(length, sample_step),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadSummary {
    pub index: usize,
    pub start: Point<f64>,
    pub end: Point<f64>,
    /// Length in drawing units
    pub length: f64,
    pub segments: usize,
    /// Polyline points produced at the queried sample step
    pub samples: usize,
}
