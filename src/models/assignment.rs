use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A donation routed to an NGO with a volunteer picked up for delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedDelivery {
    pub timestamp: DateTime<Utc>,

    pub restaurant_id: String,
    pub restaurant: String,
    pub restaurant_phone: String,
    pub restaurant_address: String,
    pub restaurant_lat: f64,
    pub restaurant_lng: f64,

    pub food_item: String,
    pub quantity: f64,
    pub unit: String,

    pub ngo_id: String,
    pub ngo: String,
    pub ngo_type: String,
    pub ngo_phone: String,
    pub ngo_address: String,
    pub ngo_lat: f64,
    pub ngo_lng: f64,
    pub ngo_priority: String,
    pub dist_rest_ngo_km: f64,
    pub route_link_rest_to_ngo: String,

    pub volunteer_id: String,
    pub volunteer: String,
    pub volunteer_phone: String,
    pub volunteer_area: String,
    pub vol_lat: f64,
    pub vol_lng: f64,
    pub dist_vol_to_rest_km: f64,
    pub route_link_vol_to_rest: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedDonation {
    pub restaurant: String,
    pub food_item: String,
    pub quantity: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnstaffedDonation {
    pub restaurant: String,
    pub ngo: String,
    pub food_item: String,
    pub quantity: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of one matching attempt. No-match outcomes are ordinary variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssignmentResult {
    Assigned(Box<AssignedDelivery>),
    NoNgoRequestingItem(UnmatchedDonation),
    NoVolunteerAvailable(UnstaffedDonation),
}

impl AssignmentResult {
    pub fn status(&self) -> &'static str {
        match self {
            AssignmentResult::Assigned(_) => "assigned",
            AssignmentResult::NoNgoRequestingItem(_) => "no_ngo_requesting_item",
            AssignmentResult::NoVolunteerAvailable(_) => "no_volunteer_available",
        }
    }

    pub fn restaurant(&self) -> &str {
        match self {
            AssignmentResult::Assigned(delivery) => &delivery.restaurant,
            AssignmentResult::NoNgoRequestingItem(record) => &record.restaurant,
            AssignmentResult::NoVolunteerAvailable(record) => &record.restaurant,
        }
    }

    pub fn assigned(&self) -> Option<&AssignedDelivery> {
        match self {
            AssignmentResult::Assigned(delivery) => Some(delivery),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::{AssignmentResult, UnmatchedDonation, UnstaffedDonation};

    #[test]
    fn unmatched_record_is_tagged_by_status() {
        let result = AssignmentResult::NoNgoRequestingItem(UnmatchedDonation {
            restaurant: "Spice Hub".to_string(),
            food_item: "Biryani".to_string(),
            quantity: 12.0,
            unit: "kg".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 9, 1, 10, 0, 0).unwrap(),
        });

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "no_ngo_requesting_item",
                "restaurant": "Spice Hub",
                "food_item": "Biryani",
                "quantity": 12.0,
                "unit": "kg",
                "timestamp": "2025-09-01T10:00:00Z"
            })
        );
    }

    #[test]
    fn unstaffed_record_carries_ngo_name_only() {
        let result = AssignmentResult::NoVolunteerAvailable(UnstaffedDonation {
            restaurant: "Spice Hub".to_string(),
            ngo: "Hope Kitchen".to_string(),
            food_item: "Rice".to_string(),
            quantity: 3.5,
            unit: "kg".to_string(),
            timestamp: Utc::now(),
        });

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "no_volunteer_available");
        assert_eq!(value["ngo"], "Hope Kitchen");
        assert!(value.get("volunteer_id").is_none());
        assert!(result.assigned().is_none());

        let parsed: AssignmentResult = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, result);
    }
}
