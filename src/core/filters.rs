use crate::models::{MenuItem, Review, Venue};
use std::str::FromStr;

/// Case-insensitive substring match on the venue name.
///
/// Mirrors the backend's `?search=` behavior so a filtered view can be
/// served from one cached snapshot.
#[inline]
pub fn venue_matches_search(venue: &Venue, needle: &str) -> bool {
    venue.name.to_lowercase().contains(&needle.to_lowercase())
}

#[inline]
pub fn venue_matches_faculty(venue: &Venue, faculty_id: i64) -> bool {
    venue.faculty_id == Some(faculty_id)
}

/// Narrow a venue snapshot by search text and faculty, preserving order.
pub fn filter_venues(
    venues: Vec<Venue>,
    search: Option<&str>,
    faculty_id: Option<i64>,
) -> Vec<Venue> {
    venues
        .into_iter()
        .filter(|venue| match search {
            Some(needle) if !needle.trim().is_empty() => {
                venue_matches_search(venue, needle.trim())
            }
            _ => true,
        })
        .filter(|venue| match faculty_id {
            Some(id) => venue_matches_faculty(venue, id),
            None => true,
        })
        .collect()
}

/// Case-insensitive search over a menu item's name and description.
#[inline]
pub fn menu_matches_search(item: &MenuItem, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    if item.name.to_lowercase().contains(&needle) {
        return true;
    }
    item.description
        .as_deref()
        .map(|d| d.to_lowercase().contains(&needle))
        .unwrap_or(false)
}

#[inline]
pub fn menu_matches_category(item: &MenuItem, category: &str) -> bool {
    item.category
        .as_deref()
        .map(|c| c.eq_ignore_ascii_case(category))
        .unwrap_or(false)
}

/// Price ordering for menu listings (`?order=price` / `?order=-price`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceOrder {
    Ascending,
    Descending,
}

impl FromStr for PriceOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(PriceOrder::Ascending),
            "-price" => Ok(PriceOrder::Descending),
            _ => Err(()),
        }
    }
}

/// Narrow and optionally reorder a menu snapshot.
///
/// Sorting is stable; items without a price always sort to the tail in
/// their original relative order.
pub fn filter_menu(
    items: Vec<MenuItem>,
    category: Option<&str>,
    search: Option<&str>,
    order: Option<PriceOrder>,
) -> Vec<MenuItem> {
    let mut items: Vec<MenuItem> = items
        .into_iter()
        .filter(|item| match category {
            Some(c) => menu_matches_category(item, c),
            None => true,
        })
        .filter(|item| match search {
            Some(needle) if !needle.trim().is_empty() => menu_matches_search(item, needle.trim()),
            _ => true,
        })
        .collect();

    match order {
        Some(PriceOrder::Ascending) => {
            items.sort_by(|a, b| match (a.price, b.price) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
        }
        Some(PriceOrder::Descending) => {
            items.sort_by(|a, b| match (a.price, b.price) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
        }
        None => {}
    }

    items
}

/// Average rating rounded to one decimal place.
///
/// Returns `None` for an empty review list rather than an average of zero,
/// so the presentation layer can distinguish "unrated" from "rated 0".
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u32 = reviews.iter().map(|r| r.rating as u32).sum();
    let avg = sum as f64 / reviews.len() as f64;
    Some((avg * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn venue(id: i64, name: &str, faculty_id: Option<i64>) -> Venue {
        Venue {
            id,
            name: name.to_string(),
            faculty_id,
            address: None,
            opens_at: None,
            closes_at: None,
            latitude: None,
            longitude: None,
            image_url: None,
        }
    }

    fn item(id: i64, name: &str, category: Option<&str>, price: Option<&str>) -> MenuItem {
        MenuItem {
            id,
            venue_id: Some(1),
            name: name.to_string(),
            description: None,
            category: category.map(str::to_string),
            price: price.map(|p| p.parse().unwrap()),
        }
    }

    fn review(rating: u8) -> Review {
        Review {
            id: 0,
            venue_id: 1,
            user_id: Some(1),
            rating,
            comment: String::new(),
            created_at: None,
            reviewer: None,
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let v = venue(1, "Cafeteria Medicina", None);
        assert!(venue_matches_search(&v, "medicina"));
        assert!(venue_matches_search(&v, "MEDI"));
        assert!(!venue_matches_search(&v, "derecho"));
    }

    #[test]
    fn test_filter_venues_combines_search_and_faculty() {
        let venues = vec![
            venue(1, "Cafeteria Medicina", Some(3)),
            venue(2, "Cafeteria Derecho", Some(3)),
            venue(3, "Cafeteria Medicina 2", Some(5)),
        ];

        let filtered = filter_venues(venues, Some("medicina"), Some(3));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let venues = vec![venue(1, "A", None), venue(2, "B", None)];
        assert_eq!(filter_venues(venues, Some("   "), None).len(), 2);
    }

    #[test]
    fn test_menu_search_covers_description() {
        let mut it = item(1, "Torta", None, None);
        it.description = Some("Con chile verde".to_string());
        assert!(menu_matches_search(&it, "chile"));
        assert!(menu_matches_search(&it, "torta"));
        assert!(!menu_matches_search(&it, "pozole"));
    }

    #[test]
    fn test_menu_category_filter() {
        let items = vec![
            item(1, "Torta", Some("Comida"), None),
            item(2, "Cafe", Some("Bebidas"), None),
            item(3, "Agua", Some("bebidas"), None),
        ];
        let filtered = filter_menu(items, Some("Bebidas"), None, None);
        assert_eq!(filtered.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_price_ordering_ascending_unpriced_last() {
        let items = vec![
            item(1, "Torta", None, Some("45.00")),
            item(2, "Especial", None, None),
            item(3, "Cafe", None, Some("20.00")),
            item(4, "Temporada", None, None),
        ];
        let ordered = filter_menu(items, None, None, Some(PriceOrder::Ascending));
        assert_eq!(ordered.iter().map(|i| i.id).collect::<Vec<_>>(), vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_price_ordering_stable_for_equal_prices() {
        let items = vec![
            item(1, "A", None, Some("25.00")),
            item(2, "B", None, Some("25.00")),
            item(3, "C", None, Some("10.00")),
        ];
        let ordered = filter_menu(items, None, None, Some(PriceOrder::Ascending));
        assert_eq!(ordered.iter().map(|i| i.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn test_price_order_parsing() {
        assert_eq!("price".parse::<PriceOrder>(), Ok(PriceOrder::Ascending));
        assert_eq!("-price".parse::<PriceOrder>(), Ok(PriceOrder::Descending));
        assert!("name".parse::<PriceOrder>().is_err());
    }

    #[test]
    fn test_average_rating_rounds_to_one_decimal() {
        let reviews = vec![review(5), review(4), review(4)];
        assert_eq!(average_rating(&reviews), Some(4.3));
    }

    #[test]
    fn test_average_rating_empty_is_none() {
        assert_eq!(average_rating(&[]), None);
    }

    #[test]
    fn test_decimal_prices_compare_numerically() {
        // "9.50" must sort below "45.00"; string comparison would invert this
        let items = vec![
            item(1, "Torta", None, Some("45.00")),
            item(2, "Cafe", None, Some("9.50")),
        ];
        let ordered = filter_menu(items, None, None, Some(PriceOrder::Ascending));
        assert_eq!(ordered[0].price, Some(dec!(9.50)));
    }
}
