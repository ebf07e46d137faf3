pub mod bounds;
pub mod coordinate;
pub mod distance;
pub mod polygon;

pub use bounds::BoundingBox;
pub use coordinate::Coordinate;
pub use distance::{EARTH_RADIUS_KM, distance_km, format_distance_km, is_within_radius};
pub use polygon::Polygon;
