use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::engine::availability::AvailabilityTracker;
use crate::engine::candidates::ngos_requesting;
use crate::engine::ranking::{best_ngo, nearest_volunteer};
use crate::geo::{directions_url, round_km};
use crate::models::assignment::{
    AssignedDelivery, AssignmentResult, UnmatchedDonation, UnstaffedDonation,
};
use crate::models::donation::Donation;
use crate::models::ngo::NgoRequest;

/// Matches one donation against the NGO table and the volunteers still free
/// in this batch. On success the chosen volunteer is marked assigned before
/// returning, so later donations in the batch cannot pick them again.
pub fn match_donation(
    donation: &Donation,
    ngos: &[NgoRequest],
    tracker: &mut AvailabilityTracker,
    now: DateTime<Utc>,
) -> AssignmentResult {
    let candidates = ngos_requesting(&donation.food_item, ngos);
    let Some(ngo) = best_ngo(&candidates, &donation.location) else {
        debug!(
            restaurant_id = %donation.restaurant_id,
            food_item = %donation.food_item,
            "no ngo requests this item"
        );
        return AssignmentResult::NoNgoRequestingItem(UnmatchedDonation {
            restaurant: donation.restaurant_name.clone(),
            food_item: donation.food_item.clone(),
            quantity: donation.quantity,
            unit: donation.unit.clone(),
            timestamp: now,
        });
    };

    let available = tracker.available();
    let Some(volunteer) = nearest_volunteer(&available, &donation.location) else {
        debug!(
            restaurant_id = %donation.restaurant_id,
            ngo_id = %ngo.item.ngo_id,
            "no volunteer available"
        );
        return AssignmentResult::NoVolunteerAvailable(UnstaffedDonation {
            restaurant: donation.restaurant_name.clone(),
            ngo: ngo.item.ngo_name.clone(),
            food_item: donation.food_item.clone(),
            quantity: donation.quantity,
            unit: donation.unit.clone(),
            timestamp: now,
        });
    };

    let (ngo, ngo_distance_km) = (ngo.item, ngo.distance_km);
    let volunteer_distance_km = volunteer.distance_km;
    let volunteer = volunteer.item.clone();
    tracker.mark_assigned(&volunteer.volunteer_id);

    info!(
        restaurant_id = %donation.restaurant_id,
        ngo_id = %ngo.ngo_id,
        volunteer_id = %volunteer.volunteer_id,
        priority_rank = ngo.priority_rank(),
        ngo_distance_km,
        volunteer_distance_km,
        "donation assigned"
    );

    AssignmentResult::Assigned(Box::new(AssignedDelivery {
        timestamp: now,

        restaurant_id: donation.restaurant_id.clone(),
        restaurant: donation.restaurant_name.clone(),
        restaurant_phone: donation.phone.clone(),
        restaurant_address: donation.address.clone(),
        restaurant_lat: donation.location.lat,
        restaurant_lng: donation.location.lng,

        food_item: donation.food_item.clone(),
        quantity: donation.quantity,
        unit: donation.unit.clone(),

        ngo_id: ngo.ngo_id.clone(),
        ngo: ngo.ngo_name.clone(),
        ngo_type: ngo.ngo_type.clone(),
        ngo_phone: ngo.phone.clone(),
        ngo_address: ngo.address.clone(),
        ngo_lat: ngo.location.lat,
        ngo_lng: ngo.location.lng,
        ngo_priority: ngo.priority_label.clone(),
        dist_rest_ngo_km: round_km(ngo_distance_km),
        route_link_rest_to_ngo: directions_url(&donation.location, &ngo.location),

        volunteer_id: volunteer.volunteer_id.clone(),
        volunteer: volunteer.name.clone(),
        volunteer_phone: volunteer.phone.clone(),
        volunteer_area: volunteer.area.clone(),
        vol_lat: volunteer.location.lat,
        vol_lng: volunteer.location.lng,
        dist_vol_to_rest_km: round_km(volunteer_distance_km),
        route_link_vol_to_rest: directions_url(&volunteer.location, &donation.location),
    }))
}
