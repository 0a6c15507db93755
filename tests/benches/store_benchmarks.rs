//! # WKN Store Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | `power` with a 63-bit exponent | < 1µs |
//! | Uncontended lock acquire + release | < 1ms |
//! | Load + save of 1000 arrays (JSON) | < 50ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;
use tempfile::TempDir;
use wkn_db::{
    power, Database, DatabaseFormat, DatabaseLock, DatabaseStore, FileDatabaseStore, LockConfig,
    StoreConfig,
};

fn bench_power(c: &mut Criterion) {
    let mut group = c.benchmark_group("power");

    for exp in [10i64, 1_000_000_006, i64::MAX] {
        group.bench_with_input(BenchmarkId::from_parameter(exp), &exp, |b, &exp| {
            b.iter(|| power(black_box(123_456_789), black_box(exp)))
        });
    }

    group.finish();
}

fn bench_lock(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".wkn.lock");
    let config = LockConfig::default();

    c.bench_function("lock_acquire_release", |b| {
        b.iter(|| DatabaseLock::acquire(&path, &config).unwrap())
    });
}

fn bench_load_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_save_1000_arrays");
    group.measurement_time(Duration::from_secs(10));

    let db: Database = (0..1000)
        .map(|i| (format!("array_{}", i), (0..16).collect::<Vec<i64>>()))
        .collect();

    for format in [DatabaseFormat::Json, DatabaseFormat::Bincode] {
        let dir = TempDir::new().unwrap();
        let store =
            FileDatabaseStore::new(StoreConfig::new(dir.path().join(".wkn")).with_format(format));
        store.save(&db).unwrap();

        group.bench_function(format!("{:?}", format), |b| {
            b.iter(|| {
                let loaded = store.load().unwrap();
                store.save(black_box(&loaded)).unwrap();
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_power, bench_lock, bench_load_save);
criterion_main!(benches);
