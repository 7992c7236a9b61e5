// Criterion benchmarks for the Buho directory service

use buho_directory::core::{classifier::partition_by_hours, geo::haversine_km, hours::TimeOfDay};
use buho_directory::models::{Coordinates, Venue};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn make_venue(id: usize) -> Venue {
    // A mix of shapes: most venues have hours, some are missing them
    let hours = match id % 4 {
        0 => None,
        1 => Some(("07:00", "15:00")),
        2 => Some(("08:30", "20:00")),
        _ => Some(("10:00", "12:30")),
    };

    Venue {
        id: id as i64,
        name: format!("Cafeteria {}", id),
        faculty_id: Some((id % 12) as i64),
        address: None,
        opens_at: hours.map(|(open, _)| open.parse().unwrap()),
        closes_at: hours.map(|(_, close)| close.parse().unwrap()),
        latitude: Some(29.05 + (id % 100) as f64 * 0.0005),
        longitude: Some(-110.99 + (id % 100) as f64 * 0.0005),
        image_url: None,
    }
}

fn bench_partition(c: &mut Criterion) {
    let now: TimeOfDay = "10:30".parse().unwrap();

    let mut group = c.benchmark_group("partition_by_hours");
    for size in [100usize, 1_000, 5_000] {
        let venues: Vec<Venue> = (0..size).map(make_venue).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &venues, |b, venues| {
            b.iter(|| partition_by_hours(black_box(venues.clone()), black_box(now)));
        });
    }
    group.finish();
}

fn bench_time_parsing(c: &mut Criterion) {
    c.bench_function("time_of_day_parse", |b| {
        b.iter(|| black_box("08:30:00").parse::<TimeOfDay>());
    });
}

fn bench_haversine(c: &mut Criterion) {
    let campus = Coordinates { latitude: 29.0828, longitude: -110.9617 };
    let venue = Coordinates { latitude: 29.0950, longitude: -110.9700 };

    c.bench_function("haversine_km", |b| {
        b.iter(|| haversine_km(black_box(campus), black_box(venue)));
    });
}

criterion_group!(benches, bench_partition, bench_time_parsing, bench_haversine);
criterion_main!(benches);
