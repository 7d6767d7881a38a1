use chrono::Utc;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::data::DataProvider;
use crate::engine::assignment::match_donation;
use crate::engine::availability::AvailabilityTracker;
use crate::error::AppError;
use crate::models::assignment::AssignmentResult;
use crate::models::donation::Donation;
use crate::models::ngo::NgoRequest;
use crate::models::volunteer::Volunteer;
use crate::store::LogStore;

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub results: Vec<AssignmentResult>,
    pub volunteers_remaining: usize,
}

/// Runs the matching sweep over `donations` in table order.
///
/// Strictly sequential: every donation sees the availability left behind by
/// the ones before it, so earlier rows win contested volunteers.
pub fn match_all(
    donations: &[Donation],
    ngos: &[NgoRequest],
    volunteers: Vec<Volunteer>,
) -> BatchOutcome {
    let mut tracker = AvailabilityTracker::new(volunteers);

    let results = donations
        .iter()
        .map(|donation| match_donation(donation, ngos, &mut tracker, Utc::now()))
        .collect();

    BatchOutcome {
        results,
        volunteers_remaining: tracker.available_count(),
    }
}

/// Loads fresh tables, matches every donation and appends the results to the
/// log store. One runner must not be driven by two batches at once when the
/// log store is shared.
pub struct BatchRunner<P, S> {
    provider: P,
    store: S,
}

impl<P: DataProvider, S: LogStore> BatchRunner<P, S> {
    pub fn new(provider: P, store: S) -> Self {
        Self { provider, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn run_batch(&self) -> Result<BatchOutcome, AppError> {
        let batch_id = Uuid::new_v4();
        let span = info_span!("batch", %batch_id);
        let _entered = span.enter();

        let donations = self.provider.load_restaurants()?;
        let ngos = self.provider.load_ngos()?;
        let volunteers = self.provider.load_volunteers()?;
        info!(
            donations = donations.len(),
            ngos = ngos.len(),
            volunteers = volunteers.len(),
            "tables loaded"
        );

        let outcome = match_all(&donations, &ngos, volunteers);

        let assigned = outcome
            .results
            .iter()
            .filter(|result| result.assigned().is_some())
            .count();
        if assigned < outcome.results.len() {
            warn!(
                unmatched = outcome.results.len() - assigned,
                "some donations were not assigned"
            );
        }

        let total_entries = self.store.append(&outcome.results)?;
        info!(
            results = outcome.results.len(),
            assigned,
            volunteers_remaining = outcome.volunteers_remaining,
            total_entries,
            "batch complete"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use super::{match_all, BatchRunner};
    use crate::data::DataProvider;
    use crate::error::AppError;
    use crate::geo::GeoPoint;
    use crate::models::assignment::AssignmentResult;
    use crate::models::donation::Donation;
    use crate::models::ngo::{NgoRequest, Priority};
    use crate::models::volunteer::Volunteer;
    use crate::store::LogStore;

    fn donation(id: &str, item: &str, lat: f64, lng: f64) -> Donation {
        Donation {
            restaurant_id: id.to_string(),
            restaurant_name: format!("rest-{id}"),
            phone: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            food_item: item.to_string(),
            quantity: 5.0,
            unit: "kg".to_string(),
            location: GeoPoint::new(lat, lng),
        }
    }

    fn ngo(id: &str, item: &str, priority: &str, lat: f64, lng: f64) -> NgoRequest {
        NgoRequest {
            ngo_id: id.to_string(),
            ngo_name: format!("ngo-{id}"),
            ngo_type: "Shelter".to_string(),
            phone: "555-0200".to_string(),
            address: "2 Side St".to_string(),
            requested_item: item.to_string(),
            priority_label: priority.to_string(),
            priority: Priority::from_label(priority),
            location: GeoPoint::new(lat, lng),
        }
    }

    fn volunteer(id: &str, lat: f64, lng: f64) -> Volunteer {
        Volunteer {
            volunteer_id: id.to_string(),
            name: format!("vol-{id}"),
            phone: "555-0300".to_string(),
            area: "Downtown".to_string(),
            location: GeoPoint::new(lat, lng),
            assigned_status: "available".to_string(),
        }
    }

    struct FixedTables {
        donations: Vec<Donation>,
        ngos: Vec<NgoRequest>,
        volunteers: Vec<Volunteer>,
    }

    impl DataProvider for FixedTables {
        fn load_restaurants(&self) -> Result<Vec<Donation>, AppError> {
            Ok(self.donations.clone())
        }

        fn load_ngos(&self) -> Result<Vec<NgoRequest>, AppError> {
            Ok(self.ngos.clone())
        }

        fn load_volunteers(&self) -> Result<Vec<Volunteer>, AppError> {
            Ok(self.volunteers.clone())
        }
    }

    struct BrokenTables;

    impl DataProvider for BrokenTables {
        fn load_restaurants(&self) -> Result<Vec<Donation>, AppError> {
            Err(AppError::Data("restaurant.csv row 2: bad latitude".to_string()))
        }

        fn load_ngos(&self) -> Result<Vec<NgoRequest>, AppError> {
            Ok(Vec::new())
        }

        fn load_volunteers(&self) -> Result<Vec<Volunteer>, AppError> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        entries: Mutex<Vec<serde_json::Value>>,
    }

    impl LogStore for MemoryStore {
        fn load(&self) -> Vec<serde_json::Value> {
            self.entries.lock().unwrap().clone()
        }

        fn append(&self, results: &[AssignmentResult]) -> Result<usize, AppError> {
            let mut entries = self.entries.lock().unwrap();
            for result in results {
                entries.push(serde_json::to_value(result)?);
            }
            Ok(entries.len())
        }
    }

    #[test]
    fn earlier_donation_wins_the_only_volunteer() {
        let donations = vec![
            donation("R1", "rice", 0.0, 0.0),
            donation("R2", "rice", 0.0, 0.001),
        ];
        let ngos = vec![ngo("N1", "rice", "high", 0.0, 0.1)];

        let outcome = match_all(&donations, &ngos, vec![volunteer("V1", 0.0, 0.05)]);

        assert_eq!(outcome.results[0].assigned().unwrap().volunteer_id, "V1");
        assert_eq!(outcome.results[1].status(), "no_volunteer_available");
        assert_eq!(outcome.volunteers_remaining, 0);
    }

    #[test]
    fn second_donation_falls_back_to_next_nearest() {
        let donations = vec![
            donation("R1", "rice", 0.0, 0.0),
            donation("R2", "rice", 0.0, 0.0),
        ];
        let ngos = vec![ngo("N1", "rice", "high", 0.0, 0.1)];
        let volunteers = vec![volunteer("V1", 0.0, 0.9), volunteer("V2", 0.0, 0.1)];

        let outcome = match_all(&donations, &ngos, volunteers);

        assert_eq!(outcome.results[0].assigned().unwrap().volunteer_id, "V2");
        assert_eq!(outcome.results[1].assigned().unwrap().volunteer_id, "V1");
    }

    #[test]
    fn no_volunteer_is_booked_twice() {
        let donations: Vec<Donation> = (0..6)
            .map(|i| donation(&format!("R{i}"), "bread", 0.0, i as f64 * 0.1))
            .collect();
        let ngos = vec![ngo("N1", "bread", "low", 0.0, 0.0)];
        let volunteers: Vec<Volunteer> = (0..4)
            .map(|i| volunteer(&format!("V{i}"), 0.1, i as f64 * 0.2))
            .collect();

        let outcome = match_all(&donations, &ngos, volunteers);

        let booked: Vec<&str> = outcome
            .results
            .iter()
            .filter_map(|r| r.assigned().map(|d| d.volunteer_id.as_str()))
            .collect();
        let unique: HashSet<&str> = booked.iter().copied().collect();
        assert_eq!(booked.len(), 4);
        assert_eq!(unique.len(), 4);
        assert_eq!(outcome.results[4].status(), "no_volunteer_available");
        assert_eq!(outcome.results[5].status(), "no_volunteer_available");
    }

    #[test]
    fn identical_tables_give_identical_assignments() {
        let donations = vec![
            donation("R1", "rice", 0.0, 0.0),
            donation("R2", "dal", 0.2, 0.2),
            donation("R3", "rice", 0.4, 0.1),
        ];
        let ngos = vec![
            ngo("N1", "rice", "medium", 0.0, 0.3),
            ngo("N2", "Dal", "urgent", 0.1, 0.1),
            ngo("N3", "rice", "medium", 0.3, 0.1),
        ];
        let volunteers = vec![volunteer("V1", 0.0, 0.1), volunteer("V2", 0.3, 0.3)];

        let summarize = |results: &[AssignmentResult]| -> Vec<(String, Option<(String, String)>)> {
            results
                .iter()
                .map(|r| {
                    (
                        r.status().to_string(),
                        r.assigned().map(|d| (d.ngo_id.clone(), d.volunteer_id.clone())),
                    )
                })
                .collect()
        };

        let first = match_all(&donations, &ngos, volunteers.clone());
        let second = match_all(&donations, &ngos, volunteers);
        assert_eq!(summarize(&first.results), summarize(&second.results));
    }

    #[test]
    fn runner_persists_results_in_processing_order() {
        let runner = BatchRunner::new(
            FixedTables {
                donations: vec![
                    donation("R1", "soup", 0.0, 0.0),
                    donation("R2", "rice", 0.0, 0.0),
                ],
                ngos: vec![ngo("N1", "rice", "urgent", 0.0, 0.1)],
                volunteers: vec![volunteer("V1", 0.0, 0.0)],
            },
            MemoryStore::default(),
        );

        let outcome = runner.run_batch().unwrap();
        assert_eq!(outcome.results.len(), 2);

        let stored = runner.store().load();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0]["status"], "no_ngo_requesting_item");
        assert_eq!(stored[1]["status"], "assigned");
        assert_eq!(stored[1]["restaurant_id"], "R2");
    }

    #[test]
    fn data_errors_fail_the_batch_without_writing() {
        let runner = BatchRunner::new(BrokenTables, MemoryStore::default());

        let err = runner.run_batch().unwrap_err();
        assert!(matches!(err, AppError::Data(_)));
        assert!(runner.store().load().is_empty());
    }
}
