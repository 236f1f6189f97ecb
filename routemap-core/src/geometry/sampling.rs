//! Path sampling
//!
//! Road curves are turned into polylines by sampling them at evenly spaced
//! arc-length positions. Any type that knows its length and can evaluate a
//! point at a normalised position implements [`CurvePath`].

use geo::{Coord, LineString};
use kurbo::{BezPath, ParamCurve, ParamCurveArclen, PathSeg};

use super::euclidean;
use crate::Error;

/// Accuracy used for kurbo arc-length computations, in drawing units
const ARCLEN_ACCURACY: f64 = 1e-6;

/// A continuous path parametrised over `t` in `[0, 1]`
pub trait CurvePath {
    /// Total length in drawing units
    fn length(&self) -> f64;

    /// Point at the normalised position `t`; `0` is the start, `1` the end
    fn point(&self, t: f64) -> Coord<f64>;
}

/// Samples `path` into a polyline whose consecutive points are at most
/// roughly `step` apart along the curve.
///
/// Always returns at least two points, the first and last being the path's
/// start and end.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if `step` is not a positive number.
pub fn sample_path<P: CurvePath + ?Sized>(path: &P, step: f64) -> Result<LineString<f64>, Error> {
    if !(step.is_finite() && step > 0.0) {
        return Err(Error::InvalidConfig(format!(
            "sample step must be positive, got {step}"
        )));
    }

    let point_count = sample_count(path.length(), step);
    let last = (point_count - 1) as f64;

    let coords = (0..point_count)
        .map(|i| path.point(i as f64 / last))
        .collect::<Vec<_>>();

    Ok(LineString::new(coords))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn sample_count(length: f64, step: f64) -> usize {
    let count = (length / step).ceil();
    if count.is_finite() && count > 2.0 {
        count as usize
    } else {
        2
    }
}

/// A parsed SVG path (`d` attribute)
#[derive(Debug, Clone)]
pub struct SvgPath {
    segments: Vec<PathSeg>,
    /// Arc length of each segment
    lengths: Vec<f64>,
    total: f64,
}

impl SvgPath {
    /// Parses SVG path data, including relative commands, arcs and
    /// multiple subpaths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathSyntax`] for malformed data and for paths that
    /// draw nothing (a lone move-to).
    pub fn parse(data: &str) -> Result<Self, Error> {
        let path =
            BezPath::from_svg(data).map_err(|e| Error::PathSyntax(format!("{e} in \"{data}\"")))?;
        Self::from_bez_path(&path)
            .ok_or_else(|| Error::PathSyntax(format!("path \"{data}\" has no drawable segments")))
    }

    /// Returns `None` if the path has no segments.
    pub fn from_bez_path(path: &BezPath) -> Option<Self> {
        let segments: Vec<PathSeg> = path.segments().collect();
        if segments.is_empty() {
            return None;
        }

        let lengths: Vec<f64> = segments
            .iter()
            .map(|seg| seg.arclen(ARCLEN_ACCURACY))
            .collect();
        let total = lengths.iter().sum();

        Some(Self {
            segments,
            lengths,
            total,
        })
    }

    pub fn start(&self) -> Coord<f64> {
        to_coord(self.segments[0].start())
    }

    pub fn end(&self) -> Coord<f64> {
        to_coord(self.segments[self.segments.len() - 1].end())
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl CurvePath for SvgPath {
    fn length(&self) -> f64 {
        self.total
    }

    fn point(&self, t: f64) -> Coord<f64> {
        if t <= 0.0 {
            return self.start();
        }
        if t >= 1.0 {
            return self.end();
        }

        let mut remaining = t * self.total;
        for (seg, &len) in self.segments.iter().zip(&self.lengths) {
            if remaining <= len {
                let local = if len > 0.0 {
                    seg.inv_arclen(remaining, ARCLEN_ACCURACY)
                } else {
                    0.0
                };
                return to_coord(seg.eval(local));
            }
            remaining -= len;
        }

        // accumulated rounding can leave a sliver past the last segment
        self.end()
    }
}

impl CurvePath for LineString<f64> {
    fn length(&self) -> f64 {
        self.lines().map(|line| euclidean(line.start, line.end)).sum()
    }

    fn point(&self, t: f64) -> Coord<f64> {
        let coords = &self.0;
        let (Some(&first), Some(&last)) = (coords.first(), coords.last()) else {
            return Coord { x: f64::NAN, y: f64::NAN };
        };
        if t <= 0.0 {
            return first;
        }
        if t >= 1.0 {
            return last;
        }

        let mut remaining = t * CurvePath::length(self);
        for line in self.lines() {
            let len = euclidean(line.start, line.end);
            if remaining <= len {
                let f = if len > 0.0 { remaining / len } else { 0.0 };
                return line.start + line.delta() * f;
            }
            remaining -= len;
        }

        last
    }
}

fn to_coord(point: kurbo::Point) -> Coord<f64> {
    Coord {
        x: point.x,
        y: point.y,
    }
}
