#[macro_use]
extern crate criterion;
extern crate mandelzoom;

use criterion::{black_box, Criterion};
use mandelzoom::{escape_count, escape_count_naive, ComplexFixed};

// A point in the seahorse valley that hangs on for a long time
// before escaping, which is the load the render loop actually sees
// near the set's edge.
const SLOW_ESCAPER: (f64, f64) = (-0.743643, 0.131825);

fn kernels(c: &mut Criterion) {
    let point = ComplexFixed::new(SLOW_ESCAPER.0, SLOW_ESCAPER.1);
    c.bench_function("escape_count", move |b| {
        b.iter(|| escape_count(black_box(point), 5000))
    });
    c.bench_function("escape_count_naive", move |b| {
        b.iter(|| escape_count_naive(black_box(point), 5000))
    });
}

criterion_group!(benches, kernels);
criterion_main!(benches);
