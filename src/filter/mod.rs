//! Proximity filters over shelter and alert records.
//!
//! Records whose geometry cannot be evaluated are never coerced into a
//! result: they come back in a `rejected` list next to the matches.

pub mod alerts;
pub mod shelters;

pub use alerts::{AlertFilter, AlertOutcome, DEFAULT_ALERT_RADIUS_KM, NearbyAlert};
pub use shelters::{RankedShelter, ShelterFilter, ShelterOutcome};

use crate::error::GeoError;

/// A record that could not be evaluated, with the reason
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected<'a, T> {
    pub record: &'a T,
    pub error: GeoError,
}
