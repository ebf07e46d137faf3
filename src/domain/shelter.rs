use serde::Deserialize;

use crate::error::Result;
use crate::geometry::Coordinate;

/// Whether a shelter is currently accepting evacuees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShelterStatus {
    #[default]
    Open,
    Closed,
}

/// Facility flags a shelter listing can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Amenity {
    PetsAllowed,
    BarrierFree,
    Toilet,
    Food,
    Medical,
    Wifi,
    Charging,
}

/// A shelter record as served by the shelter API
#[derive(Debug, Clone, Deserialize)]
pub struct Shelter {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    /// May be absent or null in loosely validated feeds
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub current_occupancy: u32,
    #[serde(default)]
    pub status: ShelterStatus,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub opened_at: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,

    #[serde(default)]
    pub pets_allowed: bool,
    #[serde(default)]
    pub barrier_free: bool,
    #[serde(default)]
    pub toilet_available: bool,
    #[serde(default)]
    pub food_available: bool,
    #[serde(default)]
    pub medical_available: bool,
    #[serde(default)]
    pub wifi_available: bool,
    #[serde(default)]
    pub charging_available: bool,
}

impl Shelter {
    /// The shelter's position; missing or non-finite components are errors
    pub fn location(&self) -> Result<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude)
    }

    pub fn has(&self, amenity: Amenity) -> bool {
        match amenity {
            Amenity::PetsAllowed => self.pets_allowed,
            Amenity::BarrierFree => self.barrier_free,
            Amenity::Toilet => self.toilet_available,
            Amenity::Food => self.food_available,
            Amenity::Medical => self.medical_available,
            Amenity::Wifi => self.wifi_available,
            Amenity::Charging => self.charging_available,
        }
    }

    pub fn available_spaces(&self) -> u32 {
        self.capacity.saturating_sub(self.current_occupancy)
    }

    /// Fraction of capacity in use, `None` when capacity is unknown (0)
    pub fn occupancy_ratio(&self) -> Option<f64> {
        if self.capacity == 0 {
            return None;
        }
        Some(self.current_occupancy as f64 / self.capacity as f64)
    }

    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.current_occupancy >= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoError;

    fn sample_json() -> &'static str {
        r#"{
            "id": 7,
            "name": "Mito Central Gym",
            "address": "Ibaraki, Mito 1-2-3",
            "latitude": 36.3659,
            "longitude": 140.4714,
            "capacity": 200,
            "current_occupancy": 150,
            "status": "open",
            "operator": "Mito City",
            "opened_at": "2025-03-01T09:00:00",
            "photos": ["/photos/1.jpg"],
            "pets_allowed": true,
            "wifi_available": true
        }"#
    }

    #[test]
    fn test_parse_shelter() {
        let s: Shelter = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(s.id, 7);
        assert_eq!(s.status, ShelterStatus::Open);
        assert!(s.has(Amenity::PetsAllowed));
        assert!(s.has(Amenity::Wifi));
        assert!(!s.has(Amenity::Medical));
        assert_eq!(s.location().unwrap(), Coordinate::new(36.3659, 140.4714));
    }

    #[test]
    fn test_missing_location_is_error() {
        let s: Shelter =
            serde_json::from_str(r#"{"id": 1, "name": "Annex", "latitude": null}"#).unwrap();
        assert!(matches!(s.location(), Err(GeoError::InvalidInput { .. })));
        assert_eq!(s.status, ShelterStatus::Open);
    }

    #[test]
    fn test_occupancy() {
        let mut s: Shelter = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(s.available_spaces(), 50);
        assert_eq!(s.occupancy_ratio(), Some(0.75));
        assert!(!s.is_full());

        s.current_occupancy = 230;
        assert_eq!(s.available_spaces(), 0);
        assert!(s.is_full());

        s.capacity = 0;
        assert_eq!(s.occupancy_ratio(), None);
        assert!(!s.is_full());
    }
}
