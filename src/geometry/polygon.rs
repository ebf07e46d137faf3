use geo::{Contains, LineString};

use super::Coordinate;
use crate::error::{GeoError, Result};

/// Signed areas (in square degrees) below this are treated as zero
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

/// A closed ring of coordinates; the last point implicitly joins the first.
///
/// Vertex order defines the winding direction, which flips the sign of the
/// intermediate area term but not the centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Coordinate>,
}

impl Polygon {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Build from `[lat, lon]` pairs as found in alert feeds
    pub fn from_pairs(pairs: &[[f64; 2]]) -> Self {
        Self::new(pairs.iter().copied().map(Coordinate::from).collect())
    }

    fn validate(&self) -> Result<()> {
        if self.points.len() < 3 {
            return Err(GeoError::degenerate(format!(
                "{} points, need at least 3",
                self.points.len()
            )));
        }
        for (i, p) in self.points.iter().enumerate() {
            p.validate()
                .map_err(|e| GeoError::invalid(format!("vertex {}: {}", i, e)))?;
        }
        Ok(())
    }

    /// Area-weighted centroid (shoelace formula).
    ///
    /// Works in (x = lon, y = lat) and hands back a `Coordinate`, so the axis
    /// order never leaks to callers.
    pub fn centroid(&self) -> Result<Coordinate> {
        self.validate()?;

        let n = self.points.len();
        let mut signed_area = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;

        for i in 0..n {
            let j = if i == 0 { n - 1 } else { i - 1 };
            let (x0, y0) = (self.points[j].lon, self.points[j].lat);
            let (x1, y1) = (self.points[i].lon, self.points[i].lat);

            let f = x0 * y1 - x1 * y0;
            signed_area += f;
            cx += (x0 + x1) * f;
            cy += (y0 + y1) * f;
        }
        signed_area *= 0.5;

        if !signed_area.is_finite() || !cx.is_finite() || !cy.is_finite() {
            return Err(GeoError::invalid(
                "vertex coordinates overflow the centroid sums",
            ));
        }
        if signed_area.abs() < DEGENERATE_AREA_EPSILON {
            return Err(GeoError::degenerate(format!(
                "enclosed area is {:e}",
                signed_area
            )));
        }

        let lat = cy / (6.0 * signed_area);
        let lon = cx / (6.0 * signed_area);
        Coordinate::new(lat, lon)
            .validated()
            .map_err(|e| GeoError::invalid(format!("centroid overflows: {}", e)))
    }

    /// Whether `point` lies strictly inside the ring
    pub fn contains(&self, point: Coordinate) -> Result<bool> {
        self.validate()?;
        point.validate()?;

        let exterior: LineString<f64> = self.points.iter().map(|p| p.to_geo()).collect();
        let polygon = geo::Polygon::new(exterior, vec![]);

        Ok(polygon.contains(&geo::Point::from(point.to_geo())))
    }
}
