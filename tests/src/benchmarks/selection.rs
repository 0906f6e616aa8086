//! # Selection Hot Paths
//!
//! Conditions:
//! - Directory listings of up to 10 000 providers
//! - Providers advertising several multiaddrs, some without `ip4`
//! - Coordinates spread over the whole globe, antipodes included

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sp_01_provider_selection::{
    filter_by_piece_size, great_circle_distance, lookup_targets, Candidate, Coordinate,
    NearestTracker, NetworkAddressLiteral,
};
use std::time::Duration;

const SIZES: [usize; 3] = [100, 1_000, 10_000];

/// A reproducible marketplace of `count` providers.
pub fn generate_candidates(count: usize, seed: u64) -> Vec<Candidate> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let mut addresses = Vec::with_capacity(3);
            for _ in 0..rng.gen_range(1..=3) {
                let ip = format!(
                    "{}.{}.{}.{}",
                    rng.gen_range(1..=223u8),
                    rng.gen::<u8>(),
                    rng.gen::<u8>(),
                    rng.gen_range(1..=254u8)
                );
                addresses.push(format!("/ip4/{ip}/tcp/24001"));
            }
            if i % 7 == 0 {
                addresses.push("/dns4/provider.example/tcp/443/wss".to_string());
            }

            let min = 1u64 << rng.gen_range(8..20);
            let max = min << rng.gen_range(4..16);
            Candidate::new(format!("f0{}", 1000 + i), addresses, min, max)
        })
        .collect()
}

/// Uniformly spread coordinates.
pub fn generate_coordinates(count: usize, seed: u64) -> Vec<Coordinate> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .filter_map(|_| {
            Coordinate::from_degrees(rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0))
                .ok()
        })
        .collect()
}

pub fn bench_great_circle_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("great-circle-distance");
    group.measurement_time(Duration::from_secs(5));

    let points = generate_coordinates(1_000, 1);
    let origin = points[0];

    group.bench_function("single_pair", |b| {
        b.iter(|| black_box(great_circle_distance(black_box(&origin), black_box(&points[1]))))
    });

    if let (Ok(a), Ok(b)) = (
        Coordinate::from_degrees(0.0, 0.0),
        Coordinate::from_degrees(0.0, 180.0),
    ) {
        group.bench_function("antipodes", |bench| {
            bench.iter(|| black_box(great_circle_distance(black_box(&a), black_box(&b))))
        });
    }

    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("fan_out_1000", |b| {
        b.iter(|| {
            let total: f64 = points.iter().map(|p| origin.distance_km(p)).sum();
            black_box(total)
        })
    });

    group.finish();
}

pub fn bench_piece_size_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("piece-size-filter");

    for count in SIZES {
        let candidates = generate_candidates(count, 2);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("filter", count),
            &candidates,
            |b, candidates| {
                b.iter(|| {
                    let kept = filter_by_piece_size(candidates.iter().cloned(), black_box(1 << 20));
                    black_box(kept.len())
                })
            },
        );
    }

    group.finish();
}

pub fn bench_nearest_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest-reduction");
    group.measurement_time(Duration::from_secs(10));

    let Ok(origin) = NetworkAddressLiteral::parse("198.51.100.1") else {
        return;
    };

    for count in SIZES {
        let candidates = generate_candidates(count, 3);
        let coordinates = generate_coordinates(count * 4, 4);
        let here = coordinates[0];

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("enumerate_and_reduce", count),
            &candidates,
            |b, candidates| {
                b.iter(|| {
                    let targets = lookup_targets(candidates, &origin);
                    let mut tracker = NearestTracker::new();
                    for (i, target) in targets.iter().enumerate() {
                        let there = &coordinates[i % coordinates.len()];
                        tracker.offer(target.candidate.id(), here.distance_km(there));
                    }
                    black_box(tracker.into_best())
                })
            },
        );
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_great_circle_distance(c);
    bench_piece_size_filter(c);
    bench_nearest_reduction(c);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generators_are_reproducible() {
        let a = generate_candidates(50, 9);
        let b = generate_candidates(50, 9);
        let ids_a: Vec<_> = a.iter().map(|c| c.id().to_string()).collect();
        let ids_b: Vec<_> = b.iter().map(|c| c.id().to_string()).collect();
        assert_eq!(ids_a, ids_b);
        assert_eq!(
            a.iter().map(|c| c.addresses().len()).collect::<Vec<_>>(),
            b.iter().map(|c| c.addresses().len()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_generated_candidates_are_enumerable() {
        let candidates = generate_candidates(70, 5);
        let origin = NetworkAddressLiteral::parse("198.51.100.1").unwrap();
        let targets = lookup_targets(&candidates, &origin);
        // Every candidate has at least one ip4 address
        assert!(targets.len() >= candidates.len());
    }
}
