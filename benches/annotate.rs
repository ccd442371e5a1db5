//! Benchmarks for line annotation.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use cnote::annotate::annotate;

fn bench_annotate_literal(c: &mut Criterion) {
    c.bench_function("annotate_literal", |b| {
        b.iter(|| annotate(black_box("a plain note line"), black_box(2)))
    });
}

fn bench_annotate_markers(c: &mut Criterion) {
    let lines = [">indent", "<<outdent", "<>reset", "^A heading line", "quit"];
    c.bench_function("annotate_markers", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(annotate(black_box(line), 3));
            }
        })
    });
}

criterion_group!(benches, bench_annotate_literal, bench_annotate_markers);
criterion_main!(benches);
