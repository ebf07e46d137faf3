use thiserror::Error;

/// Failures of the geographic computations.
///
/// Both kinds are detected before any arithmetic runs, so a caller never
/// sees NaN or infinity in place of a distance or a centroid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("degenerate polygon: {reason}")]
    DegeneratePolygon { reason: String },
}

impl GeoError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        GeoError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn degenerate(reason: impl Into<String>) -> Self {
        GeoError::DegeneratePolygon {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;
