//! Benchmarks for candidate-set merging.
//!
//! Run with:
//!   cargo bench -- merge

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use converge::prelude::*;

/// Candidate-list sizes representative of real negotiations (tens of
/// entries, not millions).
const SIZES: &[usize] = &[4, 16, 64];

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for &size in SIZES {
        // Half-overlapping lists so the intersection is non-trivial.
        let left: Vec<FormatCode> = (0..size as i64).collect();
        let right: Vec<FormatCode> = (size as i64 / 2..size as i64 * 3 / 2).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut reg = FormatRegistry::new();
                let a = reg.from_list(&left).unwrap();
                let bb = reg.from_list(&right).unwrap();
                let slot = reg.create_slot();
                reg.attach(a, slot).unwrap();
                reg.merge(a, bb).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
