use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ordered_bst::BstMap;
use std::collections::BTreeMap;

const N: usize = 10_000;

// Sorted input degrades the tree to a list, so keep it small.
const N_ORDERED: usize = 1_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── CRUD Benchmarks ────────────────────────────────────────────────────────

fn bench_add_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("add_random");

    group.bench_function(BenchmarkId::new("BstMap", N), |b| {
        b.iter(|| {
            let mut map = BstMap::new();
            for &k in &keys {
                map.add(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

fn bench_add_ordered(c: &mut Criterion) {
    let keys = ordered_keys(N_ORDERED);
    let mut group = c.benchmark_group("add_ordered");

    group.bench_function(BenchmarkId::new("BstMap", N_ORDERED), |b| {
        b.iter(|| {
            let mut map = BstMap::new();
            for &k in &keys {
                map.add(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N_ORDERED), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

fn bench_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let bst: BstMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let btree: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("get_random");

    group.bench_function(BenchmarkId::new("BstMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for k in &keys {
                sum = sum.wrapping_add(*bst.get(k).unwrap());
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for k in &keys {
                sum = sum.wrapping_add(*btree.get(k).unwrap());
            }
            sum
        });
    });

    group.finish();
}

fn bench_delete_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("delete_random");

    group.bench_function(BenchmarkId::new("BstMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<BstMap<i64, i64>>(),
            |mut map| {
                for k in &keys {
                    map.delete(k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>(),
            |mut map| {
                for k in &keys {
                    map.remove(k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Order-Statistic Benchmarks ─────────────────────────────────────────────

fn bench_rank_select(c: &mut Criterion) {
    let keys = random_keys(N);
    let bst: BstMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let btree: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let size = bst.size();

    let mut group = c.benchmark_group("rank_select");

    group.bench_function(BenchmarkId::new("BstMap", N), |b| {
        b.iter(|| {
            let mut total = 0usize;
            for (i, k) in keys.iter().enumerate().step_by(100) {
                total += bst.rank(k);
                total += usize::from(bst.select(i % size).is_some());
            }
            total
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut total = 0usize;
            for (i, k) in keys.iter().enumerate().step_by(100) {
                total += btree.range(..k).count();
                total += usize::from(btree.keys().nth(i % size).is_some());
            }
            total
        });
    });

    group.finish();
}

fn bench_floor_ceiling(c: &mut Criterion) {
    let keys = random_keys(N);
    let bst: BstMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let btree: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("floor_ceiling");

    group.bench_function(BenchmarkId::new("BstMap", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for &k in &keys {
                hits += usize::from(bst.floor(&(k + 1)).is_some());
                hits += usize::from(bst.ceiling(&(k - 1)).is_some());
            }
            hits
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for &k in &keys {
                hits += usize::from(btree.range(..=k + 1).next_back().is_some());
                hits += usize::from(btree.range(k - 1..).next().is_some());
            }
            hits
        });
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(crud_benches, bench_add_random, bench_add_ordered, bench_get_random, bench_delete_random,);

criterion_group!(order_statistic_benches, bench_rank_select, bench_floor_ceiling,);

criterion_main!(crud_benches, order_statistic_benches);
