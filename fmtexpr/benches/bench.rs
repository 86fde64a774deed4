use criterion::{Criterion, black_box, criterion_group, criterion_main};

use fmtexpr::{
    prelude::*,
    set::{difference_by_prefix, unique, unique_partition},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn random_idents(count: usize, pool: &[Ident], seed: u64) -> Vec<Ident> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| pool[rng.random_range(0..pool.len())].clone())
        .collect()
}

fn build_pack(variables: &[Variable], size: usize) -> Pack {
    // Seeded so every run benchmarks the same pack.
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    (0..size)
        .map(|_| {
            let lhs = &variables[rng.random_range(0..variables.len())];
            if rng.random_bool(0.4) {
                Entity::from(lhs.bind(rng.random_range(0..1024)))
            } else {
                let rhs = &variables[rng.random_range(0..variables.len())];
                Entity::from(lhs + rhs)
            }
        })
        .collect()
}

fn bench_set_algebra(c: &mut Criterion) {
    let pool: Vec<Ident> = (0..32).map(|i| Ident::variable(format!("v{}", i))).collect();
    let seq = random_idents(256, &pool, 0x5e7);
    let prefix = unique(random_idents(16, &pool, 0x9f));
    let full = unique(seq.iter().cloned());

    c.bench_function("unique_256", |b| {
        b.iter(|| black_box(unique(seq.iter().cloned())));
    });

    c.bench_function("unique_partition_256", |b| {
        b.iter(|| black_box(unique_partition(seq.iter().cloned())));
    });

    c.bench_function("difference_by_prefix", |b| {
        b.iter(|| black_box(difference_by_prefix(&full, &prefix)));
    });
}

fn bench_dependency_report(c: &mut Criterion) {
    let variables: Vec<Variable> = (0..24).map(|i| declare_variable(format!("v{}", i))).collect();
    let small = build_pack(&variables, 16);
    let large = build_pack(&variables, 512);

    c.bench_function("dependency_report_small", |b| {
        b.iter(|| black_box(small.dependency_report()));
    });

    c.bench_function("dependency_report_large", |b| {
        b.iter(|| black_box(large.dependency_report()));
    });

    c.bench_function("validate_large", |b| {
        b.iter(|| black_box(large.validate().is_ok()));
    });
}

criterion_group!(benches, bench_set_algebra, bench_dependency_report);
criterion_main!(benches);
