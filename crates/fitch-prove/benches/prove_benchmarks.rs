use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fitch_core::Formula;
use fitch_prove::Prover;

fn name(c: char) -> Formula {
    Formula::name(c)
}

fn bench_prove(c: &mut Criterion) {
    // a → a
    let identity = Formula::implies(name('a'), name('a'));

    // ((a → b) ∧ (b → c)) → (a → c)
    let chain = Formula::implies(
        Formula::and(
            Formula::implies(name('a'), name('b')),
            Formula::implies(name('b'), name('c')),
        ),
        Formula::implies(name('a'), name('c')),
    );

    // a ∨ ¬a forces the classical ¬E detour and a deeper search
    let excluded_middle = Formula::or(name('a'), Formula::not(name('a')));

    let mut group = c.benchmark_group("proof search");

    group.bench_function("identity", |b| {
        b.iter(|| Prover::new().prove(black_box(&identity)))
    });

    group.bench_function("implication chain", |b| {
        b.iter(|| Prover::new().prove(black_box(&chain)))
    });

    group.bench_function("excluded middle", |b| {
        b.iter(|| Prover::new().prove(black_box(&excluded_middle)))
    });

    group.finish();
}

criterion_group!(benches, bench_prove);
criterion_main!(benches);
