// Unit tests for the Buho directory service

use buho_directory::core::{
    classifier::{is_open_at, partition_by_hours},
    filters::{average_rating, filter_menu, filter_venues, PriceOrder},
    geo::{haversine_km, sort_nearest_first},
    hours::TimeOfDay,
};
use buho_directory::models::{Coordinates, MenuItem, Review, Venue};

fn venue(id: i64, name: &str, hours: Option<(&str, &str)>) -> Venue {
    Venue {
        id,
        name: name.to_string(),
        faculty_id: None,
        address: None,
        opens_at: hours.map(|(open, _)| open.parse().unwrap()),
        closes_at: hours.map(|(_, close)| close.parse().unwrap()),
        latitude: None,
        longitude: None,
        image_url: None,
    }
}

fn at(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

#[test]
fn test_partition_is_total() {
    let venues = vec![
        venue(1, "Derecho", Some(("08:00", "16:00"))),
        venue(2, "Medicina", Some(("08:00", "10:00"))),
        venue(3, "Historia", None),
        venue(4, "Artes", Some(("10:00", "22:00"))),
    ];

    let partition = partition_by_hours(venues, at("10:30"));

    assert_eq!(partition.open.len() + partition.closed.len(), 4);
    assert_eq!(
        partition.open.iter().map(|v| v.id).collect::<Vec<_>>(),
        vec![1, 4]
    );
    assert_eq!(
        partition.closed.iter().map(|v| v.id).collect::<Vec<_>>(),
        vec![2, 3]
    );
}

#[test]
fn test_missing_hours_always_closed() {
    let v = venue(1, "Sin horario", None);
    for instant in ["00:00", "08:00", "12:00", "23:59"] {
        assert!(!is_open_at(&v, at(instant)));
    }
}

#[test]
fn test_half_open_window_boundaries() {
    let v = venue(1, "Educacion", Some(("08:00", "16:00")));
    assert!(is_open_at(&v, at("08:00")));
    assert!(!is_open_at(&v, at("16:00")));
}

#[test]
fn test_overnight_window_stays_closed_late() {
    // Documented behavior: windows never wrap midnight
    let v = venue(1, "Nocturna", Some(("22:00", "02:00")));
    assert!(!is_open_at(&v, at("23:00")));
    assert!(!is_open_at(&v, at("01:00")));
}

#[test]
fn test_time_parsing_accepts_backend_format() {
    assert_eq!(at("07:30:00").minutes_of_day(), 450);
    assert_eq!(at("07:30").minutes_of_day(), 450);
}

#[test]
fn test_time_parsing_rejects_nonsense() {
    assert!("mediodia".parse::<TimeOfDay>().is_err());
    assert!("24:00".parse::<TimeOfDay>().is_err());
    assert!("12:60".parse::<TimeOfDay>().is_err());
}

#[test]
fn test_venue_search_and_faculty_filters() {
    let mut a = venue(1, "Cafeteria Medicina", None);
    a.faculty_id = Some(3);
    let mut b = venue(2, "Cafeteria Derecho", None);
    b.faculty_id = Some(4);

    let filtered = filter_venues(vec![a, b], Some("cafeteria"), Some(4));
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, 2);
}

#[test]
fn test_menu_price_ordering() {
    let item = |id: i64, price: Option<&str>| MenuItem {
        id,
        venue_id: Some(1),
        name: format!("Item {}", id),
        description: None,
        category: None,
        price: price.map(|p| p.parse().unwrap()),
    };

    let items = vec![item(1, Some("45.00")), item(2, Some("9.50")), item(3, None)];
    let ordered = filter_menu(items, None, None, Some(PriceOrder::Descending));

    assert_eq!(ordered.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn test_average_rating() {
    let review = |rating: u8| Review {
        id: 0,
        venue_id: 1,
        user_id: None,
        rating,
        comment: String::new(),
        created_at: None,
        reviewer: None,
    };

    assert_eq!(average_rating(&[review(5), review(2)]), Some(3.5));
    assert_eq!(average_rating(&[]), None);
}

#[test]
fn test_haversine_is_symmetric() {
    let a = Coordinates { latitude: 29.0828, longitude: -110.9617 };
    let b = Coordinates { latitude: 29.0950, longitude: -110.9700 };

    let there = haversine_km(a, b);
    let back = haversine_km(b, a);
    assert!((there - back).abs() < 1e-9);
    assert!(there > 0.0);
}

#[test]
fn test_proximity_sort_only_moves_located_venues() {
    let mut near = venue(1, "Cerca", None);
    near.latitude = Some(29.0829);
    near.longitude = Some(-110.9617);
    let mut far = venue(2, "Lejos", None);
    far.latitude = Some(29.2);
    far.longitude = Some(-111.1);
    let nowhere = venue(3, "Sin mapa", None);

    let mut venues = vec![far, nowhere, near];
    sort_nearest_first(
        &mut venues,
        Coordinates { latitude: 29.0828, longitude: -110.9617 },
    );

    assert_eq!(venues.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1, 2, 3]);
}
