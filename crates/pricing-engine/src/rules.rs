//! Ordered conditional rule evaluation.

use pricing_core::floor::floor_level;
use pricing_core::{AdjustmentKind, FloorId, Premium, Rule, RuleCriteria, Unit};
use rust_decimal::Decimal;

/// Enabled rules in evaluation order: ascending `order`, stable on ties.
pub(crate) fn enabled_in_order(rules: &[Rule]) -> Vec<&Rule> {
    let mut active: Vec<&Rule> = rules.iter().filter(|r| r.enabled).collect();
    active.sort_by_key(|r| r.order);
    active
}

/// Evaluates `rules` against one unit, strictly in order, accumulating
/// matching adjustments into the running price. A match that computes to
/// zero dollars leaves no premium behind.
pub(crate) fn apply(unit: &mut Unit, rules: &[&Rule], ordered_floors: &[FloorId]) {
    for rule in rules {
        let multiplier = match match_multiplier(unit, &rule.criteria, ordered_floors) {
            Some(m) => m,
            None => continue,
        };
        let amount = adjustment_amount(unit, rule, multiplier);
        if amount == Decimal::ZERO {
            continue;
        }
        let name = if multiplier > 1 {
            format!("{} (Floor {} - {}x)", rule.name, unit.floor, multiplier)
        } else {
            rule.name.clone()
        };
        unit.premiums.push(Premium {
            id: rule.id.clone(),
            name,
            kind: rule.adjustment.kind,
            value: rule.adjustment.value,
            amount,
        });
        unit.final_price += amount;
    }
}

/// Whether the unit satisfies every supplied clause, and at which floor
/// multiplier. `Some(1)` for plain matches; a floor range raises the
/// multiplier to the unit's 1-based level within it and excludes units
/// outside it.
fn match_multiplier(
    unit: &Unit,
    criteria: &RuleCriteria,
    ordered_floors: &[FloorId],
) -> Option<usize> {
    if !criteria.plan_types.is_empty() && !criteria.plan_types.contains(&unit.plan_type) {
        return None;
    }
    if !criteria.orientations.is_empty() && !criteria.orientations.contains(&unit.orientation) {
        return None;
    }
    if !criteria.floors.is_empty() && !criteria.floors.contains(&unit.floor) {
        return None;
    }
    if !criteria.size_bands.is_empty()
        && !criteria.size_bands.iter().any(|b| b.contains(unit.sqft))
    {
        return None;
    }
    if !criteria.outdoor_bands.is_empty()
        && !criteria.outdoor_bands.iter().any(|b| b.contains(unit.outdoor_sqft))
    {
        return None;
    }
    if !criteria.bedroom_counts.is_empty() && !criteria.bedroom_counts.contains(&unit.bedrooms) {
        return None;
    }
    if !criteria.bathroom_counts.is_empty()
        && !criteria.bathroom_counts.contains(&unit.bathrooms)
    {
        return None;
    }
    match &criteria.floor_range {
        Some(range) => floor_level(
            &unit.floor,
            &range.start_floor,
            &range.end_floor,
            ordered_floors,
        ),
        None => Some(1),
    }
}

/// Dollar amount the rule adds at the given multiplier. Percentage rules
/// compound: they apply to the price accumulated so far, not to the base.
fn adjustment_amount(unit: &Unit, rule: &Rule, multiplier: usize) -> Decimal {
    let m = Decimal::from(multiplier);
    match rule.adjustment.kind {
        AdjustmentKind::Fixed => rule.adjustment.value * m,
        AdjustmentKind::Percentage => {
            unit.final_price * (rule.adjustment.value / Decimal::ONE_HUNDRED) * m
        }
        AdjustmentKind::PerSqft => rule.adjustment.value * unit.sqft * m,
    }
}
