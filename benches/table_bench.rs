//! Benchmarks for table loading and the dashboard handlers
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::fmt::Write;
use std::sync::Arc;
use wastemap::dashboard::{Dashboard, DashboardSettings, Dataset, Selection};
use wastemap::data::{join_on_period, Datasets, Observation, TableLoader, UnitFilter};

const REGIONS: usize = 200;
const YEARS: std::ops::RangeInclusive<i32> = 1975..=2020;

fn synthetic_csv(unit_column: &str, accepted: &str) -> String {
    let mut csv = format!("REF_AREA,Reference area,TIME_PERIOD,OBS_VALUE,{}\n", unit_column);
    for region in 0..REGIONS {
        for year in YEARS {
            let value = (region * 31 + year as usize) as f64;
            writeln!(csv, "R{region:03},Region {region},{year},{value},{accepted}").unwrap();
            writeln!(csv, "R{region:03},Region {region},{year},{value},other").unwrap();
        }
    }
    csv
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    let csv = synthetic_csv("PRICE_BASE", "V");
    let rows = REGIONS * YEARS.count() * 2;
    let loader = TableLoader::new("GDP per capita", UnitFilter::gdp_current_prices());

    group.throughput(Throughput::Elements(rows as u64));
    group.bench_function(format!("filter_{}", rows), |b| {
        b.iter(|| loader.load_str(black_box(&csv)).unwrap())
    });

    group.finish();
}

fn bench_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("join");

    for size in [50, 500, 5000] {
        let left: Vec<Observation> = (0..size)
            .map(|i| Observation::new("USA", "United States", i, i as f64))
            .collect();
        let right: Vec<Observation> = (0..size)
            .rev()
            .step_by(2)
            .map(|i| Observation::new("USA", "United States", i, i as f64))
            .collect();
        let left: Vec<&Observation> = left.iter().collect();
        let right: Vec<&Observation> = right.iter().collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("join_{}", size), |b| {
            b.iter(|| join_on_period(black_box(&left), black_box(&right)))
        });
    }

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let gdp_csv = synthetic_csv("PRICE_BASE", "V");
    let waste_csv = synthetic_csv("Unit of measure", "Kilogrammes per person");
    let gdp = TableLoader::new("GDP per capita", UnitFilter::gdp_current_prices())
        .load_str(&gdp_csv)
        .unwrap();
    let waste = TableLoader::new("Waste per capita", UnitFilter::waste_per_person())
        .load_str(&waste_csv)
        .unwrap();
    let dashboard = Dashboard::new(
        Arc::new(Datasets::new(gdp, waste)),
        DashboardSettings::default(),
    );

    let selection = Selection::new(2000, Dataset::Gdp).clicked("Region 042");

    c.bench_function("update_all_outputs", |b| {
        b.iter(|| dashboard.update(black_box(&selection), None).unwrap())
    });
}

criterion_group!(benches, bench_load, bench_join, bench_update);
criterion_main!(benches);
