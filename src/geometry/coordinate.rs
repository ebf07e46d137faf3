use std::fmt;
use std::str::FromStr;

use crate::error::{GeoError, Result};

/// A WGS84 position in degrees.
///
/// No range check is applied: out-of-range values still produce a defined
/// (if meaningless) result. Only finiteness is validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build from optional components, as they arrive from loosely typed
    /// records. A missing component is an error, never a zero.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Result<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).validated(),
            (None, _) => Err(GeoError::invalid("latitude is missing")),
            (_, None) => Err(GeoError::invalid("longitude is missing")),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() {
            return Err(GeoError::invalid(format!(
                "latitude is not a finite number: {}",
                self.lat
            )));
        }
        if !self.lon.is_finite() {
            return Err(GeoError::invalid(format!(
                "longitude is not a finite number: {}",
                self.lon
            )));
        }
        Ok(())
    }

    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Convert to a `geo` coordinate (x = lon, y = lat).
    pub fn to_geo(self) -> geo::Coord<f64> {
        geo::coord! { x: self.lon, y: self.lat }
    }
}

/// `[lat, lon]`, the pair order used by the alert feed and map overlays.
impl From<[f64; 2]> for Coordinate {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_dir = if self.lat >= 0.0 { "N" } else { "S" };
        let lon_dir = if self.lon >= 0.0 { "E" } else { "W" };
        write!(
            f,
            "{:.4}{} / {:.4}{}",
            self.lat.abs(),
            lat_dir,
            self.lon.abs(),
            lon_dir
        )
    }
}

/// Parses `"lat,lon"`.
impl FromStr for Coordinate {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| GeoError::invalid(format!("expected \"lat,lon\", got {:?}", s)))?;

        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| GeoError::invalid(format!("latitude is not a number: {:?}", lat)))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| GeoError::invalid(format!("longitude is not a number: {:?}", lon)))?;

        Self::new(lat, lon).validated()
    }
}
