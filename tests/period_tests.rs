mod common;

use cashflow_core::{
    model::{ForecastModel, Section},
    projection::{
        build_periods, compute_weekly_totals, row_period_sums, summarize_periods, Granularity,
    },
};

const ALL: [Granularity; 4] = [
    Granularity::Week,
    Granularity::Month,
    Granularity::Quarter,
    Granularity::Year,
];

fn model() -> ForecastModel {
    ForecastModel::seed_for_range("2024-11-15", "2025-04-10").unwrap()
}

#[test]
fn periods_partition_the_grid() {
    let model = model();
    let expected: Vec<&str> = model.weeks.iter().map(|week| week.id.as_str()).collect();

    for granularity in ALL {
        let periods = build_periods(&model, granularity);
        let flattened: Vec<&str> = periods
            .iter()
            .flat_map(|period| period.weeks.iter().map(String::as_str))
            .collect();
        assert_eq!(flattened, expected, "{granularity}");
        assert!(periods.iter().all(|period| !period.weeks.is_empty()));
    }
}

#[test]
fn week_periods_use_week_ids_and_short_dates() {
    let model = ForecastModel::seed_for_range("2025-03-03", "2025-03-16").unwrap();
    let periods = build_periods(&model, Granularity::Week);

    assert_eq!(periods.len(), 2);
    assert_eq!(periods[0].id, "id000001");
    assert_eq!(periods[0].label, "Mar 03");
    assert_eq!(periods[1].label, "Mar 10");
}

#[test]
fn month_quarter_and_year_keys_are_chronological() {
    let model = model();

    let months = build_periods(&model, Granularity::Month);
    let month_ids: Vec<&str> = months.iter().map(|period| period.id.as_str()).collect();
    assert_eq!(
        month_ids,
        vec!["2024-11", "2024-12", "2025-01", "2025-02", "2025-03", "2025-04"]
    );
    assert_eq!(months[0].label, "Nov 24");
    assert_eq!(months[2].label, "Jan 25");

    let quarters = build_periods(&model, Granularity::Quarter);
    let quarter_ids: Vec<&str> = quarters.iter().map(|period| period.label.as_str()).collect();
    assert_eq!(quarter_ids, vec!["2024-Q4", "2025-Q1", "2025-Q2"]);

    let years = build_periods(&model, Granularity::Year);
    let year_ids: Vec<&str> = years.iter().map(|period| period.id.as_str()).collect();
    assert_eq!(year_ids, vec!["2024", "2025"]);
}

#[test]
fn week_spanning_month_end_belongs_to_its_start_month() {
    // 2024-12-30 (Monday) runs into January but is keyed by its start.
    let model = ForecastModel::seed_for_range("2024-12-30", "2025-01-05").unwrap();
    let periods = build_periods(&model, Granularity::Year);
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].id, "2024");
}

#[test]
fn period_balances_chain_and_sum() {
    let model = model();
    let totals = compute_weekly_totals(&model);
    let periods = build_periods(&model, Granularity::Month);
    let balances = summarize_periods(&periods, &totals);

    assert_eq!(balances.len(), periods.len());
    assert_eq!(balances[0].bop, model.bop0);
    for pair in balances.windows(2) {
        assert_eq!(pair[1].bop, pair[0].eop);
    }
    for balance in &balances {
        assert!((balance.eop - (balance.bop + balance.net)).abs() < 1e-6);
    }
    assert_eq!(balances.last().unwrap().eop, totals.final_eop().unwrap());
}

#[test]
fn row_sums_per_period() {
    let model = model();
    let periods = build_periods(&model, Granularity::Quarter);
    let salary = model.row(Section::Positives, "sal").unwrap();

    let sums = row_period_sums(salary, &periods);

    assert_eq!(sums.len(), periods.len());
    for (sum, period) in sums.iter().zip(&periods) {
        assert_eq!(*sum, 2000.0 * period.weeks.len() as f64);
    }
}
