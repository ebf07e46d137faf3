use serde::Deserialize;

use crate::error::Result;
use crate::geometry::{BoundingBox, Coordinate, Polygon};

use super::Shelter;

/// A hazard warning from the alert feed.
///
/// Geometry is optional and may come as any mix of a polygon, a bounding
/// box, and an explicit center, all as `[lat, lon]` pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub warning_type: String,
    #[serde(default)]
    pub polygon: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    pub bounds: Option<[[f64; 2]; 2]>,
    #[serde(default)]
    pub center: Option<[f64; 2]>,
}

/// The feed either returns a bare list or wraps it as `{"warning": [...]}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AlertFeed {
    List(Vec<Alert>),
    Wrapped {
        #[serde(default)]
        warning: Vec<Alert>,
    },
}

impl AlertFeed {
    pub fn into_alerts(self) -> Vec<Alert> {
        match self {
            AlertFeed::List(alerts) => alerts,
            AlertFeed::Wrapped { warning } => warning,
        }
    }
}

impl Alert {
    pub fn polygon(&self) -> Option<Polygon> {
        self.polygon.as_deref().map(Polygon::from_pairs)
    }

    pub fn bounding_box(&self) -> Option<Result<BoundingBox>> {
        self.bounds
            .map(|[a, b]| BoundingBox::from_corners(a.into(), b.into()))
    }

    pub fn center(&self) -> Option<Result<Coordinate>> {
        self.center.map(|c| Coordinate::from(c).validated())
    }

    /// Representative point for map placement: explicit center, else the
    /// polygon centroid, else the middle of the bounds.
    ///
    /// A source that fails falls through to the next one; the first error is
    /// returned only when no source yields a point.
    pub fn representative_point(&self) -> Option<Result<Coordinate>> {
        let candidates = [
            self.center(),
            self.polygon().map(|p| p.centroid()),
            self.bounding_box().map(|b| b.map(|b| b.center())),
        ];

        let mut first_error = None;
        for candidate in candidates.into_iter().flatten() {
            match candidate {
                Ok(point) => return Some(Ok(point)),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        first_error.map(Err)
    }
}

/// Alerts whose area name appears in the shelter's address
pub fn alerts_for_shelter<'a>(shelter: &Shelter, alerts: &'a [Alert]) -> Vec<&'a Alert> {
    alerts
        .iter()
        .filter(|a| !a.area.is_empty() && shelter.address.contains(&a.area))
        .collect()
}

/// Comma-joined warning types, `None` when there are none
pub fn warning_summary(alerts: &[&Alert]) -> Option<String> {
    if alerts.is_empty() {
        return None;
    }
    Some(
        alerts
            .iter()
            .map(|a| a.warning_type.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    )
}
