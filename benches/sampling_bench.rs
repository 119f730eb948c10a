use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jupyter_datatables::core::{Column, Table};
use jupyter_datatables::sampling::{SampleRequest, Sampler};
use jupyter_datatables::{fingerprint, DataTablesConfig, Preview, Result};
use std::time::Duration;

fn create_test_table(size: usize) -> Result<Table> {
    let categories = ["A", "B", "C", "D", "E"];
    let mut cat_data = Vec::with_capacity(size);
    let mut int_data = Vec::with_capacity(size);
    let mut float_data = Vec::with_capacity(size);

    for i in 0..size {
        cat_data.push(categories[i % categories.len()]);
        int_data.push((i % 1000) as i64);
        float_data.push((i as f64) * 0.1 + (i % 100) as f64);
    }

    Table::from_columns(vec![
        Column::category("category", cat_data),
        Column::int64("value", int_data),
        Column::float64("score", float_data),
    ])
}

fn benchmark_sample_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_selection");
    group.measurement_time(Duration::from_secs(10));
    let sampler = Sampler::new();

    for size in [10_000, 100_000, 1_000_000].iter() {
        let table = create_test_table(*size).unwrap();
        let request = SampleRequest::new(*size);

        group.bench_with_input(BenchmarkId::new("select", size), &table, |b, table| {
            b.iter(|| black_box(sampler.select_seeded(table, &request, Some(42)).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_sample_size_estimate(c: &mut Criterion) {
    let sampler = Sampler::new();
    let request = SampleRequest::new(1_000_000);

    c.bench_function("target_sample_size", |b| {
        b.iter(|| black_box(sampler.target_sample_size(black_box(&request)).unwrap()));
    });
}

fn benchmark_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint");

    for size in [1_000, 4_000].iter() {
        let table = create_test_table(*size).unwrap();

        group.bench_with_input(BenchmarkId::new("sha256", size), &table, |b, table| {
            b.iter(|| black_box(fingerprint(table).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_preview(c: &mut Criterion) {
    let table = create_test_table(100_000).unwrap();
    let config = DataTablesConfig::default();

    c.bench_function("preview_100k", |b| {
        b.iter(|| black_box(Preview::build_seeded(&table, &config, Some(7)).unwrap()));
    });
}

criterion_group!(
    benches,
    benchmark_sample_selection,
    benchmark_sample_size_estimate,
    benchmark_fingerprint,
    benchmark_preview
);
criterion_main!(benches);
