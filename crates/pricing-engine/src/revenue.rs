//! Revenue aggregation and scenario comparison.

use pricing_core::{FloorId, PriceBand, RevenueSummary, Scenario, Unit};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::warn;

/// Aggregates priced units into a revenue summary.
///
/// Baseline scenarios report zero deltas; everything else is measured
/// against `baseline_units`, which callers take from the project's single
/// baseline scenario. Group keys are the floors and plan types that occur
/// in `units`, and the floor map iterates bottom to top.
pub fn revenue_summary(
    units: &[Unit],
    is_baseline: bool,
    baseline_units: &[Unit],
) -> RevenueSummary {
    let total_revenue = total(units);
    let (delta_from_baseline, delta_percentage) = if is_baseline {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let baseline_total = total(baseline_units);
        let delta = total_revenue - baseline_total;
        let percentage = if baseline_total > Decimal::ZERO {
            delta / baseline_total * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
        (delta, percentage)
    };

    let mut per_floor_revenue: BTreeMap<FloorId, Decimal> = BTreeMap::new();
    let mut per_plan_type_revenue: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut unit_count_by_price_range: BTreeMap<PriceBand, usize> =
        PriceBand::ALL.into_iter().map(|band| (band, 0)).collect();
    for unit in units {
        *per_floor_revenue.entry(unit.floor.clone()).or_default() += unit.final_price;
        *per_plan_type_revenue
            .entry(unit.plan_type.clone())
            .or_default() += unit.final_price;
        *unit_count_by_price_range
            .entry(PriceBand::of(unit.final_price))
            .or_default() += 1;
    }

    RevenueSummary {
        total_revenue,
        delta_from_baseline,
        delta_percentage,
        per_floor_revenue,
        per_plan_type_revenue,
        unit_count_by_price_range,
    }
}

fn total(units: &[Unit]) -> Decimal {
    units.iter().map(|u| u.final_price).sum()
}

/// Summaries for every scenario of a project, measured against the single
/// baseline among them.
///
/// With more than one baseline the first is used and the rest are logged;
/// persisted projects are expected to hold at most one.
pub fn summarize_scenarios(scenarios: &[Scenario]) -> Vec<RevenueSummary> {
    let mut baselines = scenarios.iter().filter(|s| s.is_baseline);
    let baseline = baselines.next();
    if baselines.next().is_some() {
        warn!("multiple baseline scenarios, measuring against the first");
    }
    scenarios
        .iter()
        .map(|s| match baseline {
            Some(b) => revenue_summary(&s.units, s.is_baseline, &b.units),
            // No baseline to measure against: deltas stay zero.
            None => revenue_summary(&s.units, true, &[]),
        })
        .collect()
}
