pub mod alert;
pub mod shelter;

pub use alert::{Alert, AlertFeed, alerts_for_shelter, warning_summary};
pub use shelter::{Amenity, Shelter, ShelterStatus};
