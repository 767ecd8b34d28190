mod common;

use cashflow_core::{
    model::{ForecastModel, Recurrence},
    projection::{alert_hits, compute_weekly_totals, final_balance, find_breaches, materialize},
};
use common::{model_with_weeks, outflow};

fn draining_model() -> ForecastModel {
    let mut model = model_with_weeks(100.0, 4);
    let rent = outflow(&model, "rent", Some(Recurrence::Weekly { amount: -60.0 }));
    model.negatives.push(rent);
    materialize(&mut model);
    model
}

#[test]
fn breaches_are_strictly_below_threshold() {
    let model = draining_model();
    let totals = compute_weekly_totals(&model);

    // Balances: 40, -20, -80, -140.
    let below_zero: Vec<&str> = find_breaches(&model, &totals, 0.0)
        .into_iter()
        .map(|week| week.id.as_str())
        .collect();
    assert_eq!(below_zero, vec!["id000002", "id000003", "id000004"]);

    let below_minus_twenty = find_breaches(&model, &totals, -20.0);
    assert_eq!(below_minus_twenty.len(), 2);
    assert_eq!(below_minus_twenty[0].id, "id000003");

    assert!(find_breaches(&model, &totals, -1000.0).is_empty());
}

#[test]
fn final_balance_is_last_week_close() {
    let model = draining_model();
    let totals = compute_weekly_totals(&model);
    assert_eq!(final_balance(&model, &totals), Some(-140.0));

    let empty = ForecastModel::new(5.0, Vec::new());
    assert_eq!(final_balance(&empty, &compute_weekly_totals(&empty)), None);
}

#[test]
fn hits_carry_labels_and_balances() {
    let model = draining_model();
    let totals = compute_weekly_totals(&model);
    let hits = alert_hits(&model, &totals, 0.0);

    assert_eq!(hits.len(), 3);
    // Grid starts Monday 2024-01-01.
    assert_eq!(hits[0].label, "Jan 08");
    assert_eq!(hits[0].eop, -20.0);
    assert_eq!(hits[2].week_id, "id000004");
}
