#![deny(warnings)]

//! Deterministic repricing pipeline for unit inventories.
//!
//! A repricing pass runs every unit through four stages in a fixed order:
//! base-pricing overrides, categorical list-pricing adjustments, ordered
//! conditional rules, then global constraints and rounding. The pass is
//! pure: it reads a consistent snapshot of units and configuration and
//! returns freshly priced copies with itemized premiums rebuilt from
//! scratch, so repeated passes over the same input yield identical output.

mod base_pricing;
mod constraints;
mod list_pricing;
mod revenue;
mod rules;

pub use revenue::{revenue_summary, summarize_scenarios};

use pricing_core::{
    order_floors, BasePricingMode, GlobalSettings, ListPricingItem, Rule, Scenario, Unit,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

/// Errors for inputs the import layer should have rejected. Well-formed
/// input never errors: unmatched criteria, unknown floor labels, and
/// malformed list values all degrade to "no adjustment".
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Prices are per square foot; a unit without positive area cannot be priced.
    #[error("unit {0}: square footage must be > 0")]
    NonPositiveArea(String),
    /// Rounding to a non-positive increment is undefined.
    #[error("rounding rule must be > 0, got {0}")]
    NonPositiveRounding(Decimal),
}

/// Reprices every unit against the given configuration.
///
/// Stage order per unit: base pricing override, list pricing adjustments,
/// rules by ascending order, then constraints and rounding. Premiums and
/// final prices are rebuilt from the imported base; the input units are
/// not modified.
///
/// Example:
/// let priced = reprice_units(&units, &rules, &list, &settings, BasePricingMode::Plan)?;
pub fn reprice_units(
    units: &[Unit],
    rules: &[Rule],
    list_pricing: &[ListPricingItem],
    settings: &GlobalSettings,
    mode: BasePricingMode,
) -> Result<Vec<Unit>, PricingError> {
    if settings.rounding_rule <= Decimal::ZERO {
        return Err(PricingError::NonPositiveRounding(settings.rounding_rule));
    }
    if let Some(bad) = units.iter().find(|u| u.sqft <= Decimal::ZERO) {
        return Err(PricingError::NonPositiveArea(bad.id.clone()));
    }

    let ordered_floors = order_floors(units.iter().map(|u| u.floor.clone()));
    let active_rules = rules::enabled_in_order(rules);

    let priced: Vec<Unit> = units
        .iter()
        .map(|unit| {
            let mut priced = unit.clone();
            priced.premiums.clear();
            priced.final_price = priced.base_price;
            priced.final_price_per_sqft = priced.base_price_per_sqft;

            let base_overridden = base_pricing::resolve(&mut priced, list_pricing, mode);
            list_pricing::apply(&mut priced, list_pricing);
            rules::apply(&mut priced, &active_rules, &ordered_floors);
            constraints::apply(&mut priced, settings, base_overridden);
            priced
        })
        .collect();

    debug!(
        units = priced.len(),
        rules = active_rules.len(),
        "repriced unit snapshot"
    );
    Ok(priced)
}

/// Recomputes a scenario's units in place from its own rules, list
/// pricing, settings, and base pricing mode.
pub fn reprice_scenario(scenario: &mut Scenario) -> Result<(), PricingError> {
    let priced = reprice_units(
        &scenario.units,
        &scenario.rules,
        &scenario.list_pricing,
        &scenario.global_settings,
        scenario.base_pricing_mode,
    )?;
    scenario.units = priced;
    Ok(())
}
