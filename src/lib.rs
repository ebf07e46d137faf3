//! shelterscope - Proximity math and filtering for disaster-relief shelters
//! and hazard alerts

pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod logging;

pub use error::{GeoError, Result};
pub use geometry::{Coordinate, Polygon, distance_km};
