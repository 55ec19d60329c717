#![deny(warnings)]

//! Headless pricing CLI.
//!
//! Builds a small demo inventory, reprices a baseline and a what-if
//! scenario, and prints revenue KPIs. Useful for smoke-testing the
//! engine without a frontend.

use std::collections::BTreeSet;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use pricing_core::*;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn parse_args() -> (Option<String>, Option<i64>, bool) {
    let mut scenario: Option<String> = None;
    let mut uplift: Option<i64> = None;
    let mut json = false;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--scenario" => scenario = args.next(),
            "--uplift" => uplift = args.next().and_then(|v| v.parse().ok()),
            "--json" => json = true,
            _ => {}
        }
    }
    (scenario, uplift, json)
}

fn import_date() -> DateTime<Utc> {
    // The demo inventory is a static fixture, so its timestamp is too.
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
        .and_utc()
}

fn unit(
    id: &str,
    floor: &str,
    number: &str,
    plan: &str,
    sqft: i64,
    orientation: &str,
    outdoor: i64,
    bedrooms: u32,
    bath_tenths: i64,
    ppsf: i64,
) -> Unit {
    let sqft = Decimal::from(sqft);
    let rate = Decimal::from(ppsf);
    Unit {
        id: id.to_string(),
        floor: FloorId::from(floor),
        unit_number: number.to_string(),
        plan_type: plan.to_string(),
        sqft,
        orientation: orientation.to_string(),
        outdoor_sqft: Decimal::from(outdoor),
        bedrooms,
        bathrooms: Decimal::new(bath_tenths, 1),
        base_price_per_sqft: rate,
        base_price: rate * sqft,
        final_price: rate * sqft,
        final_price_per_sqft: rate,
        premiums: Vec::new(),
    }
}

fn demo_units() -> Vec<Unit> {
    vec![
        unit("gdn-a", "Garden", "G-A", "A1", 850, "Park", 200, 1, 10, 1_125),
        unit("gdn-b", "Garden", "G-B", "B2", 1_050, "North", 150, 2, 20, 1_150),
        unit("u-1a", "1", "1A", "A1", 850, "North", 0, 1, 10, 1_180),
        unit("u-1b", "1", "1B", "B2", 1_050, "South", 0, 2, 20, 1_190),
        unit("u-2a", "2", "2A", "A1", 850, "Park", 0, 1, 10, 1_210),
        unit("u-2b", "2", "2B", "C3", 1_400, "South", 60, 3, 25, 1_260),
        unit("u-3a", "3", "3A", "A1", 850, "North", 0, 1, 10, 1_240),
        unit("u-3b", "3", "3B", "C3", 1_400, "Park", 60, 3, 25, 1_290),
        unit("ph-1", "Penthouse", "PH-1", "PH", 2_200, "Park", 400, 4, 35, 1_500),
    ]
}

fn baseline_scenario(units: Vec<Unit>) -> Scenario {
    Scenario {
        id: "baseline".to_string(),
        name: "Baseline".to_string(),
        version: "v1".to_string(),
        created_by: "cli".to_string(),
        created_at: import_date(),
        is_baseline: true,
        rules: Vec::new(),
        global_settings: GlobalSettings::default(),
        list_pricing: Vec::new(),
        base_pricing_mode: BasePricingMode::Plan,
        units,
    }
}

fn what_if_scenario(name: &str, uplift_percent: i64, units: Vec<Unit>) -> Scenario {
    let park_view = Rule {
        id: "park-view".to_string(),
        name: "Park View".to_string(),
        enabled: true,
        order: 1,
        criteria: RuleCriteria {
            orientations: vec!["Park".to_string()],
            ..RuleCriteria::default()
        },
        adjustment: Adjustment {
            kind: AdjustmentKind::Fixed,
            value: Decimal::from(40_000),
        },
    };
    let floor_rise = Rule {
        id: "floor-rise".to_string(),
        name: "Floor Rise".to_string(),
        enabled: true,
        order: 2,
        criteria: RuleCriteria {
            floor_range: Some(FloorRange {
                start_floor: FloorId::from("1"),
                end_floor: FloorId::from("3"),
            }),
            ..RuleCriteria::default()
        },
        adjustment: Adjustment {
            kind: AdjustmentKind::Fixed,
            value: Decimal::from(2_500),
        },
    };
    let uplift = Rule {
        id: "uplift".to_string(),
        name: format!("Market Uplift {uplift_percent}%"),
        enabled: true,
        order: 3,
        criteria: RuleCriteria::default(),
        adjustment: Adjustment {
            kind: AdjustmentKind::Percentage,
            value: Decimal::from(uplift_percent),
        },
    };

    Scenario {
        id: "what-if".to_string(),
        name: name.to_string(),
        version: "v2".to_string(),
        created_by: "cli".to_string(),
        created_at: import_date(),
        is_baseline: false,
        rules: vec![park_view, floor_rise, uplift],
        global_settings: GlobalSettings::default(),
        list_pricing: vec![
            ListPricingItem {
                category: ListPricingCategory::BasePricingPlan,
                value: "B2".to_string(),
                adjustment: Decimal::from(1_225),
            },
            ListPricingItem {
                category: ListPricingCategory::Bedrooms,
                value: "1".to_string(),
                adjustment: Decimal::from(-15_000),
            },
        ],
        base_pricing_mode: BasePricingMode::Plan,
        units,
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (scenario_name, uplift, json) = parse_args();
    info!(
        ?scenario_name,
        ?uplift,
        git_sha = env!("GIT_SHA"),
        built = env!("BUILD_DATE"),
        "starting pricing CLI"
    );

    let units = demo_units();
    let floors = order_floors(units.iter().map(|u| u.floor.clone()));
    let plans: BTreeSet<&str> = units.iter().map(|u| u.plan_type.as_str()).collect();
    println!(
        "Inventory OK | units: {} | floors: {} | plan types: {}",
        units.len(),
        floors.len(),
        plans.len()
    );

    let mut scenarios = vec![
        baseline_scenario(units.clone()),
        what_if_scenario(
            scenario_name.as_deref().unwrap_or("Premium View"),
            uplift.unwrap_or(5),
            units,
        ),
    ];
    validate_scenarios(&scenarios)?;
    for scenario in &mut scenarios {
        pricing_engine::reprice_scenario(scenario)?;
    }
    let summaries = pricing_engine::summarize_scenarios(&scenarios);

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for (scenario, summary) in scenarios.iter().zip(&summaries) {
        println!(
            "KPI | scenario: {} | revenue: ${} | delta: ${} ({}%) | under $1M: {} | $1M-$1.5M: {} | $1.5M-$2M: {} | over $2M: {}",
            scenario.name,
            summary.total_revenue,
            summary.delta_from_baseline,
            summary.delta_percentage.round_dp(1),
            summary.unit_count_by_price_range[&PriceBand::UnderOneM],
            summary.unit_count_by_price_range[&PriceBand::OneToOneHalfM],
            summary.unit_count_by_price_range[&PriceBand::OneHalfToTwoM],
            summary.unit_count_by_price_range[&PriceBand::OverTwoM]
        );
    }

    Ok(())
}
