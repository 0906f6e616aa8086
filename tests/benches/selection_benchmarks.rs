//! # Provider Selection Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | Haversine distance | < 100ns |
//! | Piece-size filter, 10k providers | < 1ms |
//! | Target enumeration + reduction, 10k providers | < 5ms |

use criterion::{criterion_group, criterion_main, Criterion};

fn selection_benchmarks(c: &mut Criterion) {
    sp_tests::benchmarks::selection::register_benchmarks(c);
}

criterion_group!(benches, selection_benchmarks);
criterion_main!(benches);
