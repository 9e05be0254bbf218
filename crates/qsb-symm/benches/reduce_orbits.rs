use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qsb_core::SignRule;
use qsb_symm::{inversion, translation, Generator, Reducer, SymmetryGroup};

fn bench_reduce(c: &mut Criterion) {
    let length = 24;
    let generators = vec![
        Generator::new("T", length, &translation(length, 1), SignRule::Plain).expect("T"),
        Generator::new("Z", length, &inversion(length), SignRule::Plain).expect("Z"),
    ];
    let group = Arc::new(SymmetryGroup::new(length, generators).expect("group"));
    let reducer = Reducer::new(group, &[0, 0]).expect("reducer");
    let mut group = c.benchmark_group("reduce_orbits");
    group.bench_function("ring24_k0_z0", |b| {
        b.iter(|| {
            let mut accepted = 0usize;
            for state in (0..4096u64).map(|i| i.wrapping_mul(0x9E37_79B9) & 0xFF_FFFF) {
                if reducer.reduce(black_box(state)).accepted().is_some() {
                    accepted += 1;
                }
            }
            accepted
        })
    });
    group.finish();
}

criterion_group!(benches, bench_reduce);
criterion_main!(benches);
