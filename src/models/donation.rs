use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// One restaurant's surplus offer, as loaded from the restaurant table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub phone: String,
    pub address: String,
    pub food_item: String,
    pub quantity: f64,
    pub unit: String,
    pub location: GeoPoint,
}
