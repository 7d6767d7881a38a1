use std::cmp::Ordering;

use crate::geo::{haversine_km, GeoPoint};
use crate::models::ngo::NgoRequest;
use crate::models::volunteer::Volunteer;

/// A candidate paired with its distance to the reference point.
#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a, T> {
    pub item: &'a T,
    pub distance_km: f64,
}

/// Orders NGO candidates by `(priority rank, distance)`, both ascending.
/// The sort is stable, so equal keys keep input order.
pub fn rank_ngos<'a>(
    candidates: &[&'a NgoRequest],
    origin: &GeoPoint,
) -> Vec<Ranked<'a, NgoRequest>> {
    let mut ranked = with_distances(candidates, origin, |ngo| &ngo.location);
    ranked.sort_by(|a, b| {
        a.item
            .priority_rank()
            .cmp(&b.item.priority_rank())
            .then_with(|| compare_distance(a, b))
    });
    ranked
}

/// Orders volunteers by distance only.
pub fn rank_volunteers<'a>(
    candidates: &[&'a Volunteer],
    origin: &GeoPoint,
) -> Vec<Ranked<'a, Volunteer>> {
    let mut ranked = with_distances(candidates, origin, |volunteer| &volunteer.location);
    ranked.sort_by(|a, b| compare_distance(a, b));
    ranked
}

pub fn best_ngo<'a>(
    candidates: &[&'a NgoRequest],
    origin: &GeoPoint,
) -> Option<Ranked<'a, NgoRequest>> {
    rank_ngos(candidates, origin).into_iter().next()
}

pub fn nearest_volunteer<'a>(
    candidates: &[&'a Volunteer],
    origin: &GeoPoint,
) -> Option<Ranked<'a, Volunteer>> {
    rank_volunteers(candidates, origin).into_iter().next()
}

fn with_distances<'a, T>(
    candidates: &[&'a T],
    origin: &GeoPoint,
    location: impl Fn(&T) -> &GeoPoint,
) -> Vec<Ranked<'a, T>> {
    candidates
        .iter()
        .map(|item| Ranked {
            item: *item,
            distance_km: haversine_km(origin, location(*item)),
        })
        .collect()
}

fn compare_distance<T>(a: &Ranked<'_, T>, b: &Ranked<'_, T>) -> Ordering {
    a.distance_km.total_cmp(&b.distance_km)
}
