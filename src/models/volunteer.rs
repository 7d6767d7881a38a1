use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Assigned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volunteer {
    pub volunteer_id: String,
    pub name: String,
    pub phone: String,
    pub area: String,
    pub location: GeoPoint,
    pub assigned_status: String,
}

impl Volunteer {
    /// Availability at load time; only an `available` status (any case) counts.
    pub fn initial_availability(&self) -> Availability {
        if self.assigned_status.trim().eq_ignore_ascii_case("available") {
            Availability::Available
        } else {
            Availability::Assigned
        }
    }
}
