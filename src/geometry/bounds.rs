use super::Coordinate;
use crate::error::Result;

/// Axis-aligned lat/lon box, inclusive on every edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Build from two opposite corners given in any order
    pub fn from_corners(a: Coordinate, b: Coordinate) -> Result<Self> {
        a.validate()?;
        b.validate()?;

        Ok(Self {
            min_lat: a.lat.min(b.lat),
            max_lat: a.lat.max(b.lat),
            min_lon: a.lon.min(b.lon),
            max_lon: a.lon.max(b.lon),
        })
    }

    /// Smallest box enclosing all points
    pub fn from_points(points: &[Coordinate]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut bounds = Self {
            min_lat: f64::MAX,
            max_lat: f64::MIN,
            min_lon: f64::MAX,
            max_lon: f64::MIN,
        };
        for p in points {
            bounds.min_lat = bounds.min_lat.min(p.lat);
            bounds.max_lat = bounds.max_lat.max(p.lat);
            bounds.min_lon = bounds.min_lon.min(p.lon);
            bounds.max_lon = bounds.max_lon.max(p.lon);
        }
        Some(bounds)
    }

    pub fn contains(&self, point: Coordinate) -> Result<bool> {
        point.validate()?;
        Ok(point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lon >= self.min_lon
            && point.lon <= self.max_lon)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let b = BoundingBox::from_corners(Coordinate::new(36.5, 140.8), Coordinate::new(35.7, 139.7))
            .unwrap();
        assert_eq!(b.min_lat, 35.7);
        assert_eq!(b.max_lat, 36.5);
        assert_eq!(b.min_lon, 139.7);
        assert_eq!(b.max_lon, 140.8);
    }

    #[test]
    fn test_contains_inclusive() {
        let b = BoundingBox::from_corners(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0))
            .unwrap();
        assert!(b.contains(Coordinate::new(0.5, 0.5)).unwrap());
        assert!(b.contains(Coordinate::new(1.0, 0.0)).unwrap());
        assert!(!b.contains(Coordinate::new(1.1, 0.5)).unwrap());
        assert!(b.contains(Coordinate::new(f64::NAN, 0.5)).is_err());
    }

    #[test]
    fn test_from_points() {
        assert!(BoundingBox::from_points(&[]).is_none());

        let points = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(2.0, 1.0),
            Coordinate::new(1.0, 4.0),
        ];
        let b = BoundingBox::from_points(&points).unwrap();
        assert_eq!(b.min_lat, 0.0);
        assert_eq!(b.max_lat, 2.0);
        assert_eq!(b.max_lon, 4.0);
        assert_eq!(b.center(), Coordinate::new(1.0, 2.0));
    }

    #[test]
    fn test_rejects_nan_corner() {
        assert!(
            BoundingBox::from_corners(Coordinate::new(f64::NAN, 0.0), Coordinate::new(1.0, 1.0))
                .is_err()
        );
    }
}
