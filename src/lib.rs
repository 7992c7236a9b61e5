//! Buho Directory - campus cafeteria directory service
//!
//! This library powers the El Buho Tragon single-page app: it fetches venue,
//! menu and review snapshots from the campus REST backend, classifies venues
//! as open or closed by their posted hours, and serves the shaped results
//! over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{classifier::{is_open_at, partition_by_hours, HoursPartition}, hours::TimeOfDay};
pub use crate::models::{MenuItem, Review, Venue, VenueSummary};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let noon: TimeOfDay = "12:00".parse().unwrap();
        assert_eq!(noon.minutes_of_day(), 720);
    }
}
