pub mod assignment;
pub mod availability;
pub mod batch;
pub mod candidates;
pub mod ranking;
pub mod trigger;
