// Core algorithm exports
pub mod classifier;
pub mod filters;
pub mod geo;
pub mod hours;

pub use classifier::{is_open_at, partition_by_hours, HoursPartition};
pub use filters::{average_rating, filter_menu, filter_venues, PriceOrder};
pub use geo::{haversine_km, sort_nearest_first};
pub use hours::{ParseTimeError, TimeOfDay};
