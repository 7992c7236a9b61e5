use crate::core::hours::TimeOfDay;
use crate::models::Venue;

/// Result of partitioning a venue snapshot by posted hours.
///
/// Every input venue lands in exactly one list, and each list keeps the
/// relative order of the snapshot it came from.
#[derive(Debug, Clone, Default)]
pub struct HoursPartition {
    pub open: Vec<Venue>,
    pub closed: Vec<Venue>,
}

impl HoursPartition {
    pub fn total(&self) -> usize {
        self.open.len() + self.closed.len()
    }
}

/// Whether a venue's posted hours contain `now`.
///
/// A venue with either bound missing is closed. The window is half-open:
/// a venue opens the minute `opens_at` strikes and is already closed at
/// `closes_at` sharp. Windows whose close precedes their open never wrap
/// past midnight; they are simply empty outside the literal numeric range.
#[inline]
pub fn is_open_at(venue: &Venue, now: TimeOfDay) -> bool {
    match (venue.opens_at, venue.closes_at) {
        (Some(open), Some(close)) => {
            let now = now.minutes_of_day();
            open.minutes_of_day() <= now && now < close.minutes_of_day()
        }
        _ => false,
    }
}

/// Partition a venue snapshot into open and closed lists as of `now`.
pub fn partition_by_hours(venues: Vec<Venue>, now: TimeOfDay) -> HoursPartition {
    let mut partition = HoursPartition::default();
    for venue in venues {
        if is_open_at(&venue, now) {
            partition.open.push(venue);
        } else {
            partition.closed.push(venue);
        }
    }
    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hours::TimeOfDay;

    fn venue(id: i64, hours: Option<(&str, &str)>) -> Venue {
        Venue {
            id,
            name: format!("Cafeteria {}", id),
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
    fn test_mid_morning_scenario() {
        // now = 10:30; A 08:00-16:00 open, B 08:00-10:00 closed, C no hours closed
        let venues = vec![
            venue(1, Some(("08:00", "16:00"))),
            venue(2, Some(("08:00", "10:00"))),
            venue(3, None),
        ];

        let partition = partition_by_hours(venues, at("10:30"));

        assert_eq!(partition.open.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(
            partition.closed.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[test]
    fn test_overnight_window_never_wraps() {
        // 22:00-02:00 reads as an empty-ish window; at 23:00 the venue is closed
        let venues = vec![venue(4, Some(("22:00", "02:00")))];

        let partition = partition_by_hours(venues, at("23:00"));

        assert!(partition.open.is_empty());
        assert_eq!(partition.closed.len(), 1);
    }

    #[test]
    fn test_equal_open_close_is_always_closed() {
        let v = venue(5, Some(("09:00", "09:00")));
        assert!(!is_open_at(&v, at("09:00")));
        assert!(!is_open_at(&v, at("12:00")));
    }

    #[test]
    fn test_window_is_half_open() {
        let v = venue(6, Some(("08:00", "16:00")));
        assert!(is_open_at(&v, at("08:00")), "open at the opening minute");
        assert!(is_open_at(&v, at("15:59")));
        assert!(!is_open_at(&v, at("16:00")), "closed at the closing minute");
        assert!(!is_open_at(&v, at("07:59")));
    }

    #[test]
    fn test_missing_single_bound_is_closed() {
        let mut v = venue(7, Some(("08:00", "16:00")));
        v.closes_at = None;
        assert!(!is_open_at(&v, at("10:00")));

        let mut v = venue(8, Some(("08:00", "16:00")));
        v.opens_at = None;
        assert!(!is_open_at(&v, at("10:00")));
    }

    #[test]
    fn test_totality_no_loss_no_duplication() {
        let venues: Vec<Venue> = (0..50)
            .map(|i| {
                if i % 3 == 0 {
                    venue(i, None)
                } else {
                    venue(i, Some(("08:00", "16:00")))
                }
            })
            .collect();

        let partition = partition_by_hours(venues, at("12:00"));

        assert_eq!(partition.total(), 50);
        let mut ids: Vec<i64> = partition
            .open
            .iter()
            .chain(partition.closed.iter())
            .map(|v| v.id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_order_preserved_within_each_list() {
        let venues = vec![
            venue(10, Some(("08:00", "16:00"))),
            venue(11, None),
            venue(12, Some(("06:00", "22:00"))),
            venue(13, Some(("18:00", "20:00"))),
            venue(14, Some(("09:00", "13:00"))),
        ];

        let partition = partition_by_hours(venues, at("12:00"));

        assert_eq!(
            partition.open.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![10, 12, 14]
        );
        assert_eq!(
            partition.closed.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![11, 13]
        );
    }

    #[test]
    fn test_empty_input_yields_empty_lists() {
        let partition = partition_by_hours(Vec::new(), at("12:00"));
        assert!(partition.open.is_empty());
        assert!(partition.closed.is_empty());
    }

    #[test]
    fn test_idempotence() {
        let venues = vec![
            venue(1, Some(("08:00", "16:00"))),
            venue(2, None),
            venue(3, Some(("11:00", "12:00"))),
        ];

        let first = partition_by_hours(venues.clone(), at("11:30"));
        let second = partition_by_hours(venues, at("11:30"));

        assert_eq!(
            first.open.iter().map(|v| v.id).collect::<Vec<_>>(),
            second.open.iter().map(|v| v.id).collect::<Vec<_>>()
        );
        assert_eq!(
            first.closed.iter().map(|v| v.id).collect::<Vec<_>>(),
            second.closed.iter().map(|v| v.id).collect::<Vec<_>>()
        );
    }
}
