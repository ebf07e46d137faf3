use super::Coordinate;
use crate::error::{GeoError, Result};

/// Sphere radius used for all distances, in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers (haversine).
///
/// Fails with `InvalidInput` if either point has a non-finite component, or
/// if the components are so large that the arithmetic overflows.
pub fn distance_km(a: Coordinate, b: Coordinate) -> Result<f64> {
    a.validate()?;
    b.validate()?;

    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    if !d_lat.is_finite() || !d_lon.is_finite() {
        return Err(GeoError::invalid(format!(
            "coordinate difference overflows between {:?} and {:?}",
            a, b
        )));
    }

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push h a hair outside [0, 1] for antipodal points
    let h = h.clamp(0.0, 1.0);

    let km = 2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt());
    if !km.is_finite() {
        return Err(GeoError::invalid(format!(
            "distance between {:?} and {:?} is not finite",
            a, b
        )));
    }
    Ok(km)
}

/// Whether `point` lies within `max_km` of `center` (inclusive)
pub fn is_within_radius(point: Coordinate, center: Coordinate, max_km: f64) -> Result<bool> {
    Ok(distance_km(point, center)? <= max_km)
}

/// Render a distance the way shelter listings show it, e.g. `12.3km`
pub fn format_distance_km(km: f64) -> String {
    format!("{:.1}km", km)
}
