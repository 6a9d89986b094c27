//! Benchmarks for the selection path and page rendering
//!
//! Run with: cargo bench

use chrono::{Duration, NaiveDate};
use covid_dashboard::charts::{Overview, PlotlyFigure};
use covid_dashboard::dataset::loader::parse_long;
use covid_dashboard::dataset::{CaseRecord, Dataset};
use covid_dashboard::layout::{render_data_table, render_fragment};
use covid_dashboard::selection::{Selection, SelectionHandler};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::path::Path;
use std::sync::Arc;

fn create_test_records(countries: usize, days: usize) -> Vec<CaseRecord> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 22).unwrap();
    (0..countries)
        .flat_map(|c| {
            (0..days).map(move |d| {
                let confirmed = ((c + 1) * (d + 1) * 37) as u64;
                CaseRecord::new(
                    format!("Country {:03}", c),
                    start + Duration::days(d as i64),
                    confirmed,
                    confirmed / 30,
                    confirmed / 3,
                )
            })
        })
        .collect()
}

fn create_test_csv(countries: usize, days: usize) -> String {
    let mut csv = String::from("country,date,confirmed,deaths,recovered\n");
    for r in create_test_records(countries, days) {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            r.country, r.date, r.confirmed, r.deaths, r.recovered
        ));
    }
    csv
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for countries in [10, 100] {
        let csv = create_test_csv(countries, 120);
        group.throughput(Throughput::Elements((countries * 120) as u64));

        group.bench_function(format!("parse_long_{}", countries), |b| {
            b.iter(|| parse_long(black_box(csv.as_bytes()), Path::new("bench.csv")).unwrap())
        });

        let records = create_test_records(countries, 120);
        group.bench_function(format!("from_records_{}", countries), |b| {
            b.iter(|| Dataset::from_records(black_box(records.clone())).unwrap())
        });
    }

    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");

    let dataset = Arc::new(Dataset::from_records(create_test_records(200, 365)).unwrap());
    let handler = SelectionHandler::new(Arc::clone(&dataset));

    group.bench_function("global", |b| {
        b.iter(|| handler.handle_selection(black_box(&Selection::Global)).unwrap())
    });

    let country = Selection::Country("Country 042".to_string());
    group.bench_function("country", |b| {
        b.iter(|| handler.handle_selection(black_box(&country)).unwrap())
    });

    let pair = handler.handle_selection(&Selection::Global).unwrap();
    group.bench_function("time_series_figure", |b| {
        b.iter(|| black_box(&pair.time_series).to_figure_string())
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let dataset = Dataset::from_records(create_test_records(200, 30)).unwrap();
    let table = dataset.country_table();

    group.bench_function("country_table", |b| {
        b.iter(|| render_fragment(&render_data_table(black_box(&table))))
    });

    let overview = Overview::build(&dataset);
    group.bench_function("bubble_map_figure", |b| {
        b.iter(|| black_box(&overview.bubble_map).to_figure())
    });

    group.finish();
}

criterion_group!(benches, bench_load, bench_selection, bench_render);
criterion_main!(benches);
