use crate::models::{Coordinates, Venue};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinate pairs, in kilometers.
#[inline]
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Reorder venues nearest-first relative to a caller location.
///
/// Venues without coordinates keep their relative order at the tail; the
/// sort is stable so ties keep snapshot order.
pub fn sort_nearest_first(venues: &mut [Venue], from: Coordinates) {
    venues.sort_by(|a, b| {
        let da = a.coordinates().map(|c| haversine_km(from, c));
        let db = b.coordinates().map(|c| haversine_km(from, c));
        match (da, db) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
}
