use criterion::{black_box, criterion_group, criterion_main, Criterion};
use selector::combinations::combinations;

fn bench_combinations(c: &mut Criterion) {
    let few: Vec<String> = (0..4).map(|i| format!(".c{i}")).collect();
    let many: Vec<String> = (0..16).map(|i| format!(".c{i}")).collect();

    c.bench_function("combinations_4_k3", |b| {
        b.iter(|| combinations(black_box(&few), 3))
    });
    c.bench_function("combinations_16_k3", |b| {
        b.iter(|| combinations(black_box(&many), 3))
    });
}

criterion_group!(benches, bench_combinations);
criterion_main!(benches);
