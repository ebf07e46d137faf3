use tracing::{debug, warn};

use super::Rejected;
use crate::domain::{Amenity, Shelter, ShelterStatus};
use crate::error::Result;
use crate::geometry::{Coordinate, distance_km};

/// Criteria for the shelter listing
#[derive(Debug, Clone, Default)]
pub struct ShelterFilter {
    /// Case-insensitive match against name or address
    pub search: Option<String>,
    pub status: Option<ShelterStatus>,
    /// Every listed amenity must be present
    pub amenities: Vec<Amenity>,
    /// Where distances are measured from, typically the user's location
    pub origin: Option<Coordinate>,
    /// Zero or negative means no limit
    pub max_distance_km: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct RankedShelter<'a> {
    pub shelter: &'a Shelter,
    /// Set whenever the filter has an origin
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ShelterOutcome<'a> {
    pub matches: Vec<RankedShelter<'a>>,
    pub rejected: Vec<Rejected<'a, Shelter>>,
}

impl ShelterFilter {
    fn distance_limit(&self) -> Option<f64> {
        self.max_distance_km.filter(|km| *km > 0.0)
    }

    fn matches_attributes(&self, shelter: &Shelter) -> bool {
        if let Some(status) = self.status
            && shelter.status != status
        {
            return false;
        }

        if let Some(search) = self.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            let needle = search.to_lowercase();
            if !shelter.name.to_lowercase().contains(&needle)
                && !shelter.address.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        self.amenities.iter().all(|a| shelter.has(*a))
    }

    /// Apply the filter to `shelters`.
    ///
    /// Fails only if the origin itself is invalid. With an origin the
    /// matches are ordered nearest first; without one input order is kept.
    pub fn apply<'a>(&self, shelters: &'a [Shelter]) -> Result<ShelterOutcome<'a>> {
        let origin = self.origin.map(Coordinate::validated).transpose()?;
        let limit = self.distance_limit();
        let mut outcome = ShelterOutcome::default();

        for shelter in shelters {
            if !self.matches_attributes(shelter) {
                continue;
            }

            let Some(origin) = origin else {
                outcome.matches.push(RankedShelter {
                    shelter,
                    distance_km: None,
                });
                continue;
            };

            let km = match shelter.location().and_then(|loc| distance_km(origin, loc)) {
                Ok(km) => km,
                Err(error) => {
                    warn!(shelter_id = shelter.id, %error, "Shelter has no usable location");
                    outcome.rejected.push(Rejected {
                        record: shelter,
                        error,
                    });
                    continue;
                }
            };

            if let Some(limit) = limit
                && km > limit
            {
                debug!(shelter_id = shelter.id, km, limit, "Shelter out of range");
                continue;
            }

            outcome.matches.push(RankedShelter {
                shelter,
                distance_km: Some(km),
            });
        }

        if origin.is_some() {
            outcome.matches.sort_by(|a, b| {
                let a = a.distance_km.unwrap_or(f64::INFINITY);
                let b = b.distance_km.unwrap_or(f64::INFINITY);
                a.total_cmp(&b)
            });
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoError;

    const MITO: Coordinate = Coordinate {
        lat: 36.3659,
        lon: 140.4714,
    };

    fn shelter(id: i64, name: &str, lat: Option<f64>, lon: Option<f64>) -> Shelter {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "address": format!("Ibaraki, {}", name),
            "latitude": lat,
            "longitude": lon,
            "capacity": 100,
        }))
        .unwrap()
    }

    fn fixtures() -> Vec<Shelter> {
        let mut far = shelter(1, "Tsukuba Hall", Some(36.0835), Some(140.0764));
        far.wifi_available = true;
        let mut near = shelter(2, "Mito School", Some(36.3700), Some(140.4800));
        near.wifi_available = true;
        near.pets_allowed = true;
        let mut closed = shelter(3, "Hitachi Gym", Some(36.5991), Some(140.6505));
        closed.status = ShelterStatus::Closed;
        vec![far, near, closed]
    }

    #[test]
    fn test_no_criteria_keeps_everything_in_order() {
        let shelters = fixtures();
        let outcome = ShelterFilter::default().apply(&shelters).unwrap();
        let ids: Vec<i64> = outcome.matches.iter().map(|m| m.shelter.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(outcome.matches.iter().all(|m| m.distance_km.is_none()));
    }

    #[test]
    fn test_status_and_search() {
        let shelters = fixtures();

        let filter = ShelterFilter {
            status: Some(ShelterStatus::Closed),
            ..Default::default()
        };
        let outcome = filter.apply(&shelters).unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].shelter.id, 3);

        let filter = ShelterFilter {
            search: Some("mito".to_string()),
            ..Default::default()
        };
        let outcome = filter.apply(&shelters).unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].shelter.id, 2);
    }

    #[test]
    fn test_amenities_must_all_match() {
        let shelters = fixtures();
        let filter = ShelterFilter {
            amenities: vec![Amenity::Wifi, Amenity::PetsAllowed],
            ..Default::default()
        };
        let outcome = filter.apply(&shelters).unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].shelter.id, 2);
    }

    #[test]
    fn test_origin_sorts_nearest_first() {
        let shelters = fixtures();
        let filter = ShelterFilter {
            origin: Some(MITO),
            ..Default::default()
        };
        let outcome = filter.apply(&shelters).unwrap();
        let ids: Vec<i64> = outcome.matches.iter().map(|m| m.shelter.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert!(outcome.matches[0].distance_km.unwrap() < 1.5);
    }

    #[test]
    fn test_equal_distances_keep_input_order() {
        let mut shelters = fixtures();
        shelters.insert(0, shelter(11, "Mito Annex B", Some(36.37), Some(140.48)));
        shelters.push(shelter(10, "Mito Annex A", Some(36.37), Some(140.48)));
        shelters.push(shelter(12, "Mito Annex C", Some(36.37), Some(140.48)));

        let filter = ShelterFilter {
            origin: Some(MITO),
            ..Default::default()
        };
        let outcome = filter.apply(&shelters).unwrap();
        let ids: Vec<i64> = outcome.matches.iter().map(|m| m.shelter.id).collect();
        // Shelter 2 sits at 36.3700/140.4800 too, so four-way tie
        assert_eq!(ids, vec![11, 2, 10, 12, 3, 1]);
    }

    #[test]
    fn test_distance_limit() {
        let shelters = fixtures();
        let filter = ShelterFilter {
            origin: Some(MITO),
            max_distance_km: Some(20.0),
            ..Default::default()
        };
        let outcome = filter.apply(&shelters).unwrap();
        let ids: Vec<i64> = outcome.matches.iter().map(|m| m.shelter.id).collect();
        assert_eq!(ids, vec![2]);

        let unlimited = ShelterFilter {
            origin: Some(MITO),
            max_distance_km: Some(0.0),
            ..Default::default()
        };
        assert_eq!(unlimited.apply(&shelters).unwrap().matches.len(), 3);
    }

    #[test]
    fn test_bad_location_is_rejected_not_zero() {
        let mut shelters = fixtures();
        shelters.push(shelter(4, "Mito Annex", None, Some(140.47)));
        let mut nan = shelter(5, "Mito Depot", Some(36.37), Some(140.47));
        nan.latitude = Some(f64::NAN);
        shelters.push(nan);

        let filter = ShelterFilter {
            origin: Some(MITO),
            max_distance_km: Some(5.0),
            ..Default::default()
        };
        let outcome = filter.apply(&shelters).unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.rejected.len(), 2);
        assert_eq!(outcome.rejected[0].record.id, 4);
        assert!(matches!(
            outcome.rejected[1].error,
            GeoError::InvalidInput { .. }
        ));
    }

    #[test]
    fn test_invalid_origin_fails() {
        let shelters = fixtures();
        let filter = ShelterFilter {
            origin: Some(Coordinate::new(f64::NAN, 140.0)),
            ..Default::default()
        };
        assert!(filter.apply(&shelters).is_err());
    }
}
