use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
    Unspecified,
}

impl Priority {
    /// Unrecognized labels fall back to `Unspecified`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "urgent" => Priority::Urgent,
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            _ => Priority::Unspecified,
        }
    }

    /// Lower rank is served first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Urgent => 1,
            Priority::High => 2,
            Priority::Medium => 3,
            Priority::Low => 4,
            Priority::Unspecified => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NgoRequest {
    pub ngo_id: String,
    pub ngo_name: String,
    pub ngo_type: String,
    pub phone: String,
    pub address: String,
    pub requested_item: String,
    /// Label as it appeared in the source table, echoed into assignment records.
    pub priority_label: String,
    pub priority: Priority,
    pub location: GeoPoint,
}

impl NgoRequest {
    pub fn priority_rank(&self) -> u8 {
        self.priority.rank()
    }
}

#[cfg(test)]
mod tests {
    use super::Priority;

    #[test]
    fn labels_map_case_insensitively() {
        assert_eq!(Priority::from_label("URGENT"), Priority::Urgent);
        assert_eq!(Priority::from_label(" High "), Priority::High);
        assert_eq!(Priority::from_label("medium"), Priority::Medium);
        assert_eq!(Priority::from_label("Low"), Priority::Low);
    }

    #[test]
    fn unknown_labels_rank_last() {
        assert_eq!(Priority::from_label("critical"), Priority::Unspecified);
        assert_eq!(Priority::from_label(""), Priority::Unspecified);
        assert_eq!(Priority::Unspecified.rank(), 5);
    }

    #[test]
    fn ranks_follow_declaration_order() {
        let ranks: Vec<u8> = [
            Priority::Urgent,
            Priority::High,
            Priority::Medium,
            Priority::Low,
            Priority::Unspecified,
        ]
        .into_iter()
        .map(Priority::rank)
        .collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert!(Priority::Urgent < Priority::Low);
    }
}
