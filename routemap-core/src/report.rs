//! Distance and map reports

use std::io::Write;

use serde::Serialize;

use crate::Error;
use crate::model::{RoadMap, RoadNetwork};
use crate::routing::SettlementDistance;

/// Everything printed for a distance run
#[derive(Debug, Clone, Serialize)]
pub struct DistanceReport {
    pub components: usize,
    pub junction: Option<JunctionReport>,
    pub distances: Vec<SettlementDistance>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct JunctionReport {
    pub x: f64,
    pub y: f64,
    pub gap: f64,
    pub roads: (usize, usize),
}

impl DistanceReport {
    pub fn new(network: &RoadNetwork, distances: Vec<SettlementDistance>) -> Self {
        Self {
            components: network.component_count(),
            junction: network.junction.map(|j| JunctionReport {
                x: j.point.x,
                y: j.point.y,
                gap: j.gap,
                roads: j.roads,
            }),
            distances,
        }
    }

    /// `Connected components: N`, a blank line, then one
    /// `A <-> B: D.DD km` line per pair
    pub fn write_text<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        writeln!(out, "Connected components: {}", self.components)?;
        writeln!(out)?;
        for d in &self.distances {
            writeln!(out, "{} <-> {}: {:.2} km", d.from, d.to, d.distance_km)?;
        }
        Ok(())
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }

    /// `from,to,distance_km` rows with full precision distances
    pub fn write_csv<W: Write>(&self, out: W) -> Result<(), Error> {
        let mut writer = csv::Writer::from_writer(out);
        for d in &self.distances {
            writer.serialize(d)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Lists road endpoints and lengths, then settlement positions
pub fn write_inspection<W: Write>(
    out: &mut W,
    map: &RoadMap,
    sample_step: f64,
) -> Result<(), Error> {
    writeln!(out, "Roads: {}", map.road_count())?;
    for road in map.road_summaries(sample_step) {
        writeln!(
            out,
            "  #{}: ({:.3}, {:.3}) -> ({:.3}, {:.3}), length {:.3}, {} segments, {} samples",
            road.index,
            road.start.x(),
            road.start.y(),
            road.end.x(),
            road.end.y(),
            road.length,
            road.segments,
            road.samples
        )?;
    }

    writeln!(out, "Settlements: {}", map.settlement_count())?;
    for settlement in map.settlements() {
        writeln!(
            out,
            "  {}: ({:.3}, {:.3})",
            settlement.name,
            settlement.position.x(),
            settlement.position.y()
        )?;
    }
    Ok(())
}
