use bumpalo::Bump;
use criterion::{criterion_group, criterion_main, Criterion};
use hdlc_util::intern::StringPool;

fn bench_intern_fresh(c: &mut Criterion) {
    c.bench_function("intern 1000 distinct names", |b| {
        let names: Vec<String> = (0..1000).map(|i| format!("signal_{i}")).collect();
        b.iter(|| {
            let arena = Bump::new();
            let pool = StringPool::new(&arena);
            for name in &names {
                std::hint::black_box(pool.intern(name));
            }
        });
    });
}

fn bench_intern_repeated(c: &mut Criterion) {
    c.bench_function("intern repeated hits", |b| {
        let arena = Bump::new();
        let pool = StringPool::new(&arena);
        pool.intern("clk");
        pool.intern("reset");
        b.iter(|| {
            std::hint::black_box(pool.intern("clk"));
            std::hint::black_box(pool.intern("reset"));
        });
    });
}

criterion_group!(benches, bench_intern_fresh, bench_intern_repeated);
criterion_main!(benches);
