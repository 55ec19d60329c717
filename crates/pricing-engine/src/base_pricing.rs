//! Base pricing resolution: $/sqft overrides keyed by plan type or floor.

use pricing_core::{BasePricingMode, ListPricingCategory, ListPricingItem, Unit};
use rust_decimal::Decimal;
use tracing::warn;

/// Applies the base-pricing override matching `mode`, if any.
///
/// A matching entry replaces the unit's $/sqft outright and reinitializes
/// the running price from it; no premium is recorded. Only entries of the
/// category selected by `mode` are considered, and non-positive rates are
/// inert placeholders. When several entries match the same unit the last
/// one wins and the collision is logged.
///
/// Returns true when an override was applied. Overridden units are exempt
/// from the minimum $/sqft clamp later in the pass.
pub(crate) fn resolve(
    unit: &mut Unit,
    list_pricing: &[ListPricingItem],
    mode: BasePricingMode,
) -> bool {
    let mut applied = false;
    for item in list_pricing {
        if item.adjustment <= Decimal::ZERO {
            continue;
        }
        let matches = match (mode, item.category) {
            (BasePricingMode::Plan, ListPricingCategory::BasePricingPlan) => {
                unit.plan_type == item.value
            }
            (BasePricingMode::Floor, ListPricingCategory::BasePricingFloor) => {
                unit.floor.as_str() == item.value
            }
            _ => false,
        };
        if !matches {
            continue;
        }
        if applied {
            warn!(
                unit = %unit.id,
                value = %item.value,
                "duplicate base pricing entry, last match wins"
            );
        }
        unit.base_price_per_sqft = item.adjustment;
        unit.base_price = item.adjustment * unit.sqft;
        unit.final_price = unit.base_price;
        unit.final_price_per_sqft = unit.base_price_per_sqft;
        applied = true;
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricing_core::FloorId;

    fn unit(plan: &str, floor: &str) -> Unit {
        Unit {
            id: "u1".to_string(),
            floor: FloorId::from(floor),
            unit_number: "1A".to_string(),
            plan_type: plan.to_string(),
            sqft: Decimal::from(1_000),
            orientation: "North".to_string(),
            outdoor_sqft: Decimal::ZERO,
            bedrooms: 1,
            bathrooms: Decimal::ONE,
            base_price_per_sqft: Decimal::from(1_200),
            base_price: Decimal::from(1_200_000),
            final_price: Decimal::from(1_200_000),
            final_price_per_sqft: Decimal::from(1_200),
            premiums: vec![],
        }
    }

    fn entry(category: ListPricingCategory, value: &str, rate: i64) -> ListPricingItem {
        ListPricingItem {
            category,
            value: value.to_string(),
            adjustment: Decimal::from(rate),
        }
    }

    #[test]
    fn plan_mode_overrides_matching_plan() {
        let mut u = unit("B2", "3");
        let items = vec![entry(ListPricingCategory::BasePricingPlan, "B2", 1_400)];
        let applied = resolve(&mut u, &items, BasePricingMode::Plan);
        assert!(applied);
        assert_eq!(u.base_price_per_sqft, Decimal::from(1_400));
        assert_eq!(u.base_price, Decimal::from(1_400_000));
        assert_eq!(u.final_price, Decimal::from(1_400_000));
        assert!(u.premiums.is_empty());
    }

    #[test]
    fn plan_mode_ignores_floor_entries() {
        let mut u = unit("B2", "3");
        let items = vec![entry(ListPricingCategory::BasePricingFloor, "3", 1_400)];
        assert!(!resolve(&mut u, &items, BasePricingMode::Plan));
        assert_eq!(u.final_price, Decimal::from(1_200_000));
    }

    #[test]
    fn floor_mode_overrides_matching_floor() {
        let mut u = unit("B2", "Garden");
        let items = vec![entry(ListPricingCategory::BasePricingFloor, "Garden", 950)];
        assert!(resolve(&mut u, &items, BasePricingMode::Floor));
        assert_eq!(u.final_price, Decimal::from(950_000));
    }

    #[test]
    fn nonpositive_rates_are_placeholders() {
        let mut u = unit("B2", "3");
        let items = vec![
            entry(ListPricingCategory::BasePricingPlan, "B2", 0),
            entry(ListPricingCategory::BasePricingPlan, "B2", -100),
        ];
        assert!(!resolve(&mut u, &items, BasePricingMode::Plan));
        assert_eq!(u.base_price_per_sqft, Decimal::from(1_200));
    }

    #[test]
    fn last_matching_entry_wins() {
        let mut u = unit("B2", "3");
        let items = vec![
            entry(ListPricingCategory::BasePricingPlan, "B2", 1_300),
            entry(ListPricingCategory::BasePricingPlan, "B2", 1_500),
        ];
        assert!(resolve(&mut u, &items, BasePricingMode::Plan));
        assert_eq!(u.base_price_per_sqft, Decimal::from(1_500));
        assert_eq!(u.final_price, Decimal::from(1_500_000));
    }

    #[test]
    fn no_match_leaves_unit_untouched() {
        let mut u = unit("B2", "3");
        let items = vec![entry(ListPricingCategory::BasePricingPlan, "A1", 1_400)];
        assert!(!resolve(&mut u, &items, BasePricingMode::Plan));
        assert_eq!(u.base_price, Decimal::from(1_200_000));
        assert_eq!(u.final_price_per_sqft, Decimal::from(1_200));
    }
}
