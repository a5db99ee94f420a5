use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use avl_set::AvlTreeSet;

const N: usize = 100_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen()).collect();

    c.bench_function("set_insert", |b| {
        let mut set = AvlTreeSet::new();
        b.iter(|| {
            for value in &values {
                set.insert(*value);
            }
        })
    });

    let set: AvlTreeSet<i32> = values.iter().copied().collect();

    c.bench_function("set_find", |b| {
        b.iter(|| {
            for value in &values {
                black_box(set.find(value));
            }
        })
    });

    c.bench_function("set_lower_bound", |b| {
        b.iter(|| {
            for value in &values {
                black_box(set.lower_bound(&value.wrapping_add(1)));
            }
        })
    });

    c.bench_function("set_iter", |b| {
        b.iter(|| {
            for value in &set {
                black_box(value);
            }
        })
    });

    c.bench_function("set_cursor", |b| {
        b.iter(|| {
            let mut cursor = set.begin();
            while !cursor.is_end() {
                black_box(cursor.value());
                cursor.move_next();
            }
        })
    });

    c.bench_function("set_clone", |b| b.iter(|| black_box(set.clone())));

    c.bench_function("set_remove", |b| {
        let mut set = set.clone();
        b.iter(|| {
            for value in &values {
                set.remove(value);
            }
        })
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
