//! Drawing to longitude/latitude mapping from control points

use geo::{AffineTransform, Coord};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::Error;

/// A drawing position with its known longitude and latitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub drawing: [f64; 2],
    pub lonlat: [f64; 2],
}

/// Least-squares affine map from drawing units to (longitude, latitude)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Georeference {
    transform: AffineTransform<f64>,
}

impl Georeference {
    /// Fits `lon = a*x + b*y + c` and `lat = d*x + e*y + f` to the control
    /// points. Exact for three points, least squares for more.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for fewer than three points or when
    /// the drawing positions are collinear
    pub fn fit(points: &[ControlPoint]) -> Result<Self, Error> {
        if points.len() < 3 {
            return Err(Error::InvalidData(format!(
                "georeference needs at least 3 control points, got {}",
                points.len()
            )));
        }

        #[allow(clippy::cast_precision_loss)]
        let n = points.len() as f64;
        let mean = |f: fn(&ControlPoint) -> f64| points.iter().map(f).sum::<f64>() / n;
        let (mx, my) = (mean(|p| p.drawing[0]), mean(|p| p.drawing[1]));
        let (mlon, mlat) = (mean(|p| p.lonlat[0]), mean(|p| p.lonlat[1]));

        // Normal equations on centred coordinates; the offset terms drop out
        let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
        let (mut sx_lon, mut sy_lon, mut sx_lat, mut sy_lat) = (0.0, 0.0, 0.0, 0.0);
        for p in points {
            let (x, y) = (p.drawing[0] - mx, p.drawing[1] - my);
            let (lon, lat) = (p.lonlat[0] - mlon, p.lonlat[1] - mlat);
            sxx += x * x;
            sxy += x * y;
            syy += y * y;
            sx_lon += x * lon;
            sy_lon += y * lon;
            sx_lat += x * lat;
            sy_lat += y * lat;
        }

        let det = sxx * syy - sxy * sxy;
        let spread = sxx + syy;
        if !det.is_finite() || det <= 1e-12 * spread * spread {
            return Err(Error::InvalidData(
                "georeference control points are collinear".to_string(),
            ));
        }

        let solve = |bx: f64, by: f64| ((syy * bx - sxy * by) / det, (sxx * by - sxy * bx) / det);
        let (a, b) = solve(sx_lon, sy_lon);
        let (d, e) = solve(sx_lat, sy_lat);
        let c = mlon - a * mx - b * my;
        let f = mlat - d * mx - e * my;
        debug!("Georeference lon = {a}x + {b}y + {c}, lat = {d}x + {e}y + {f}");

        Ok(Self {
            transform: AffineTransform::new(a, b, c, d, e, f),
        })
    }

    /// Maps a drawing coordinate to (longitude, latitude)
    pub fn apply(&self, coord: Coord<f64>) -> Coord<f64> {
        self.transform.apply(coord)
    }

    pub fn transform(&self) -> &AffineTransform<f64> {
        &self.transform
    }
}
