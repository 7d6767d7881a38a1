pub mod assignment;
pub mod donation;
pub mod ngo;
pub mod volunteer;
