use cashflow_core::{
    config::Settings,
    model::ForecastModel,
    projection::{build_periods, build_report, compute_weekly_totals, materialize, Granularity},
};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

fn ten_year_model() -> ForecastModel {
    ForecastModel::seed_for_range("2025-01-01", "2034-12-31").expect("valid range")
}

fn bench_materialize(c: &mut Criterion) {
    let seeded = ten_year_model();
    let weeks = seeded.weeks.clone();

    c.bench_function("materialize_10y_fresh", |b| {
        b.iter_batched(
            || {
                let mut model = seeded.clone();
                model.remap_weeks(weeks.clone());
                model
            },
            |mut model| {
                black_box(materialize(&mut model));
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("materialize_10y_idempotent", |b| {
        b.iter_batched(
            || seeded.clone(),
            |mut model| {
                black_box(materialize(&mut model));
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_read_side(c: &mut Criterion) {
    let model = ten_year_model();

    c.bench_function("weekly_totals_10y", |b| {
        b.iter(|| black_box(compute_weekly_totals(&model)))
    });

    c.bench_function("month_periods_10y", |b| {
        b.iter(|| black_box(build_periods(&model, Granularity::Month)))
    });

    let settings = Settings {
        collapsed: true,
        ..Settings::default()
    };
    c.bench_function("collapsed_report_10y", |b| {
        b.iter(|| black_box(build_report(&model, &settings)))
    });
}

criterion_group!(benches, bench_materialize, bench_read_side);
criterion_main!(benches);
