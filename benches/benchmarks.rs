use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

use prefstore::{MemoryBackend, NullBackend, PreferenceStorage, PreferenceStore};

fn bool_store() -> PreferenceStore<bool> {
    let storage = PreferenceStorage::new(
        Arc::new(NullBackend::new()),
        "bench.v1.flag",
        true,
    );
    PreferenceStore::new(storage)
}

fn store_read_benchmark(c: &mut Criterion) {
    let store = bool_store();

    c.bench_function("store_read", |b| {
        b.iter(|| {
            black_box(store.get());
        });
    });
}

fn store_write_benchmark(c: &mut Criterion) {
    let store = bool_store();

    c.bench_function("store_write", |b| {
        let mut on = false;
        b.iter(|| {
            store.set(black_box(on));
            on = !on;
        });
    });
}

fn toggle_benchmark(c: &mut Criterion) {
    let store = bool_store();

    c.bench_function("store_toggle", |b| {
        b.iter(|| {
            store.toggle();
        });
    });
}

fn fan_out_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");

    for observers in [1usize, 10, 100] {
        group.bench_with_input(
            BenchmarkId::from_parameter(observers),
            &observers,
            |b, &observers| {
                let store = bool_store();
                let _guards: Vec<_> = (0..observers)
                    .map(|_| store.subscribe(|| {}))
                    .collect();

                let mut on = false;
                b.iter(|| {
                    store.set(black_box(on));
                    on = !on;
                });
            },
        );
    }

    group.finish();
}

fn persistence_benchmark(c: &mut Criterion) {
    let storage = PreferenceStorage::new(
        Arc::new(MemoryBackend::new()),
        "bench.v1.flag",
        true,
    );

    c.bench_function("storage_save_load", |b| {
        b.iter(|| {
            storage.save(black_box(&false));
            black_box(storage.load());
        });
    });
}

criterion_group!(
    benches,
    store_read_benchmark,
    store_write_benchmark,
    toggle_benchmark,
    fan_out_benchmark,
    persistence_benchmark
);
criterion_main!(benches);
