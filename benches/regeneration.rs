use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use xcl::{primitives, ClassType, Instance};

fn wide_class(fields: usize) -> Arc<ClassType> {
    let mut class = ClassType::record("Wide");
    for i in 0..fields {
        class = class
            .with_field(format!("Field{}", i), primitives::integer())
            .unwrap();
    }
    Arc::new(class)
}

// A generated instance has a token cache, like a parsed one
fn cached_instance(fields: usize) -> Instance {
    let mut instance = Instance::new(wide_class(fields), None).unwrap();
    instance.generate_tokens();
    instance
}

fn benchmark_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("reuse_cached_tokens");
    for fields in [4, 32, 256] {
        let mut instance = cached_instance(fields);
        group.bench_with_input(BenchmarkId::from_parameter(fields), &fields, |b, _| {
            b.iter(|| black_box(instance.generate_tokens().len()))
        });
    }
    group.finish();
}

fn benchmark_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild_after_set");
    for fields in [4, 32, 256] {
        let mut instance = cached_instance(fields);
        let mut n = 0i64;
        group.bench_with_input(BenchmarkId::from_parameter(fields), &fields, |b, _| {
            b.iter(|| {
                n += 1;
                instance.set("Field0", black_box(n)).unwrap();
                black_box(instance.generate_tokens().len())
            })
        });
    }
    group.finish();
}

fn benchmark_update_data(c: &mut Criterion) {
    let mut instance = cached_instance(32);
    c.bench_function("update_data_clean_32", |b| {
        b.iter(|| instance.update_data().unwrap())
    });
}

fn benchmark_to_text(c: &mut Criterion) {
    let mut instance = cached_instance(32);
    c.bench_function("to_text_cached_32", |b| {
        b.iter(|| black_box(instance.to_text()))
    });
}

criterion_group!(
    benches,
    benchmark_reuse,
    benchmark_rebuild,
    benchmark_update_data,
    benchmark_to_text
);
criterion_main!(benches);
