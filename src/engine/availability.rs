use std::collections::HashMap;

use tracing::debug;

use crate::models::volunteer::{Availability, Volunteer};

/// Volunteer availability for the lifetime of one batch.
///
/// Each row is seeded from its own status column and nothing is written back.
/// Assignment is keyed by volunteer id, so every row sharing the id leaves
/// the pool together. Volunteers are listed in table order so distance ties
/// resolve the same way on every run.
#[derive(Debug)]
pub struct AvailabilityTracker {
    volunteers: Vec<Volunteer>,
    states: Vec<Availability>,
    rows_by_id: HashMap<String, Vec<usize>>,
}

impl AvailabilityTracker {
    pub fn new(volunteers: Vec<Volunteer>) -> Self {
        let states = volunteers
            .iter()
            .map(Volunteer::initial_availability)
            .collect();

        let mut rows_by_id: HashMap<String, Vec<usize>> = HashMap::new();
        for (row, volunteer) in volunteers.iter().enumerate() {
            rows_by_id
                .entry(volunteer.volunteer_id.clone())
                .or_default()
                .push(row);
        }

        Self {
            volunteers,
            states,
            rows_by_id,
        }
    }

    pub fn available(&self) -> Vec<&Volunteer> {
        self.volunteers
            .iter()
            .zip(&self.states)
            .filter(|(_, state)| **state == Availability::Available)
            .map(|(volunteer, _)| volunteer)
            .collect()
    }

    pub fn available_count(&self) -> usize {
        self.states
            .iter()
            .filter(|state| **state == Availability::Available)
            .count()
    }

    /// `Available` if any row with this id is still free.
    pub fn state_of(&self, volunteer_id: &str) -> Option<Availability> {
        let rows = self.rows_by_id.get(volunteer_id)?;
        let any_free = rows
            .iter()
            .any(|&row| self.states[row] == Availability::Available);

        Some(if any_free {
            Availability::Available
        } else {
            Availability::Assigned
        })
    }

    /// Marks `volunteer_id` as assigned for the rest of the batch. Returns
    /// whether the volunteer was available before the call.
    pub fn mark_assigned(&mut self, volunteer_id: &str) -> bool {
        let Some(rows) = self.rows_by_id.get(volunteer_id) else {
            return false;
        };

        let mut was_available = false;
        for &row in rows {
            was_available |= self.states[row] == Availability::Available;
            self.states[row] = Availability::Assigned;
        }

        debug!(volunteer_id, was_available, "volunteer marked assigned");
        was_available
    }
}
