use tracing::{debug, warn};

use super::Rejected;
use crate::domain::Alert;
use crate::error::{GeoError, Result};
use crate::geometry::{Coordinate, distance_km};

/// Alerts further than this from the user are not shown
pub const DEFAULT_ALERT_RADIUS_KM: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct AlertFilter {
    pub origin: Coordinate,
    pub max_distance_km: f64,
}

#[derive(Debug, Clone)]
pub struct NearbyAlert<'a> {
    pub alert: &'a Alert,
    /// Where to place the alert's marker, if its geometry yields one
    pub marker: Option<Coordinate>,
    /// Distance from the origin to `marker`
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct AlertOutcome<'a> {
    pub matches: Vec<NearbyAlert<'a>>,
    pub rejected: Vec<Rejected<'a, Alert>>,
}

/// Result of testing one alert; an error is only reported when no other
/// piece of geometry placed the alert nearby
enum Proximity {
    Nearby,
    Distant,
    Unknown(GeoError),
}

impl AlertFilter {
    pub fn new(origin: Coordinate) -> Self {
        Self {
            origin,
            max_distance_km: DEFAULT_ALERT_RADIUS_KM,
        }
    }

    pub fn with_radius(mut self, max_distance_km: f64) -> Self {
        self.max_distance_km = max_distance_km;
        self
    }

    fn proximity(&self, alert: &Alert) -> Proximity {
        let mut first_error = None;
        let mut note = |e: GeoError| {
            first_error.get_or_insert(e);
        };

        if let Some(bounds) = alert.bounding_box() {
            match bounds.and_then(|b| b.contains(self.origin)) {
                Ok(true) => return Proximity::Nearby,
                Ok(false) => {}
                Err(e) => note(e),
            }
        }

        let polygon = alert.polygon();
        if let Some(polygon) = &polygon {
            match polygon.contains(self.origin) {
                Ok(true) => return Proximity::Nearby,
                Ok(false) => {}
                Err(e) => note(e),
            }
        }

        if let Some(center) = alert.center() {
            match center.and_then(|c| distance_km(self.origin, c)) {
                Ok(km) if km <= self.max_distance_km => return Proximity::Nearby,
                Ok(_) => {}
                Err(e) => note(e),
            }
        }

        if let Some(polygon) = &polygon {
            match polygon
                .centroid()
                .and_then(|c| distance_km(self.origin, c))
            {
                Ok(km) if km <= self.max_distance_km => return Proximity::Nearby,
                Ok(_) => {}
                Err(e) => note(e),
            }
        }

        match first_error {
            Some(e) => Proximity::Unknown(e),
            None => Proximity::Distant,
        }
    }

    /// Alerts near the origin.
    ///
    /// An alert with no geometry at all is simply not nearby. Fails only if
    /// the origin itself is invalid.
    pub fn apply<'a>(&self, alerts: &'a [Alert]) -> Result<AlertOutcome<'a>> {
        self.origin.validate()?;
        let mut outcome = AlertOutcome::default();

        for alert in alerts {
            match self.proximity(alert) {
                Proximity::Nearby => {}
                Proximity::Distant => {
                    debug!(area = %alert.area, "Alert not nearby");
                    continue;
                }
                Proximity::Unknown(error) => {
                    warn!(area = %alert.area, %error, "Alert geometry unusable");
                    outcome.rejected.push(Rejected {
                        record: alert,
                        error,
                    });
                    continue;
                }
            }

            let marker = match alert.representative_point() {
                Some(Ok(point)) => Some(point),
                Some(Err(error)) => {
                    warn!(area = %alert.area, %error, "No marker position for alert");
                    None
                }
                None => None,
            };
            let distance_km = marker.and_then(|m| distance_km(self.origin, m).ok());

            outcome.matches.push(NearbyAlert {
                alert,
                marker,
                distance_km,
            });
        }

        Ok(outcome)
    }
}
