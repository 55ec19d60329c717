//! Categorical flat-dollar adjustments keyed by unit attributes.

use pricing_core::{AdjustmentKind, ListPricingCategory, ListPricingItem, Premium, Unit};
use rust_decimal::Decimal;

/// Applies every matching flat-adjustment entry to the unit.
///
/// Categories are processed in a fixed order so premium lists come out
/// identical across passes; within a category, entries keep their input
/// order. Matches stack additively on the running price. Entries with a
/// zero adjustment are placeholders and entries whose value fails strict
/// parsing match nothing.
pub(crate) fn apply(unit: &mut Unit, list_pricing: &[ListPricingItem]) {
    for category in ListPricingCategory::ADJUSTMENT_ORDER {
        for item in list_pricing.iter().filter(|i| i.category == category) {
            if item.adjustment == Decimal::ZERO {
                continue;
            }
            let label = match match_item(unit, item) {
                Some(label) => label,
                None => continue,
            };
            unit.premiums.push(Premium {
                id: format!("list-{}-{}", category.slug(), item.value),
                name: label,
                kind: AdjustmentKind::Fixed,
                value: item.adjustment,
                amount: item.adjustment,
            });
            unit.final_price += item.adjustment;
        }
    }
}

/// Tests one entry against the unit, returning the premium label on a
/// match. Base-pricing entries never match here; they are consumed by the
/// base pricing resolver.
fn match_item(unit: &Unit, item: &ListPricingItem) -> Option<String> {
    match item.category {
        ListPricingCategory::PlanType => {
            (unit.plan_type == item.value).then(|| format!("Plan Type: {}", item.value))
        }
        ListPricingCategory::Orientation => {
            (unit.orientation == item.value).then(|| format!("Orientation: {}", item.value))
        }
        ListPricingCategory::Floor => {
            (unit.floor.as_str() == item.value).then(|| format!("Floor: {}", item.value))
        }
        ListPricingCategory::Bedrooms => {
            let count = item.value.parse::<u32>().ok()?;
            (unit.bedrooms == count).then(|| counted_label(&item.value, "Bedroom"))
        }
        ListPricingCategory::Bathrooms => {
            let count = item.value.parse::<Decimal>().ok()?;
            (unit.bathrooms == count).then(|| counted_label(&item.value, "Bathroom"))
        }
        ListPricingCategory::Sqft => {
            let (min, max) = parse_band(&item.value)?;
            (min <= unit.sqft && unit.sqft <= max)
                .then(|| format!("{} - {} sqft", thousands(min), thousands(max)))
        }
        ListPricingCategory::Outdoor => {
            let (min, max) = parse_band(&item.value)?;
            if !(min <= unit.outdoor_sqft && unit.outdoor_sqft <= max) {
                return None;
            }
            if min == Decimal::ZERO && max == Decimal::ZERO {
                Some("No outdoor space".to_string())
            } else {
                Some(format!("{} - {} sqft outdoor", thousands(min), thousands(max)))
            }
        }
        ListPricingCategory::BasePricingPlan | ListPricingCategory::BasePricingFloor => None,
    }
}

/// Decodes the inclusive "{min}-{max}" band encoding.
fn parse_band(value: &str) -> Option<(Decimal, Decimal)> {
    let (min, max) = value.split_once('-')?;
    let min = min.parse::<Decimal>().ok()?;
    let max = max.parse::<Decimal>().ok()?;
    Some((min, max))
}

/// "1 Bedroom", "2 Bedrooms", "2.5 Bathrooms".
fn counted_label(count: &str, noun: &str) -> String {
    if count == "1" {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Thousands-separated rendering for band labels, e.g. "1,500".
fn thousands(value: Decimal) -> String {
    let text = value.normalize().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricing_core::FloorId;

    fn unit() -> Unit {
        Unit {
            id: "u1".to_string(),
            floor: FloorId::from("3"),
            unit_number: "3B".to_string(),
            plan_type: "B2".to_string(),
            sqft: Decimal::from(1_200),
            orientation: "North".to_string(),
            outdoor_sqft: Decimal::from(80),
            bedrooms: 2,
            bathrooms: Decimal::new(25, 1), // 2.5
            base_price_per_sqft: Decimal::from(1_000),
            base_price: Decimal::from(1_200_000),
            final_price: Decimal::from(1_200_000),
            final_price_per_sqft: Decimal::from(1_000),
            premiums: vec![],
        }
    }

    fn entry(category: ListPricingCategory, value: &str, dollars: i64) -> ListPricingItem {
        ListPricingItem {
            category,
            value: value.to_string(),
            adjustment: Decimal::from(dollars),
        }
    }

    #[test]
    fn plan_type_match_adds_labeled_premium() {
        let mut u = unit();
        apply(&mut u, &[entry(ListPricingCategory::PlanType, "B2", 50_000)]);
        assert_eq!(u.final_price, Decimal::from(1_250_000));
        assert_eq!(u.premiums.len(), 1);
        let p = &u.premiums[0];
        assert_eq!(p.id, "list-planType-B2");
        assert_eq!(p.name, "Plan Type: B2");
        assert_eq!(p.kind, AdjustmentKind::Fixed);
        assert_eq!(p.amount, Decimal::from(50_000));
    }

    #[test]
    fn categories_apply_in_fixed_order() {
        let mut u = unit();
        // Outdoor listed first in the input, but plan type applies first.
        let items = vec![
            entry(ListPricingCategory::Outdoor, "50-200", 10_000),
            entry(ListPricingCategory::PlanType, "B2", 20_000),
        ];
        apply(&mut u, &items);
        assert_eq!(u.premiums.len(), 2);
        assert_eq!(u.premiums[0].name, "Plan Type: B2");
        assert_eq!(u.premiums[1].name, "50 - 200 sqft outdoor");
        assert_eq!(u.final_price, Decimal::from(1_230_000));
    }

    #[test]
    fn bedroom_labels_pluralize() {
        let mut u = unit();
        u.bedrooms = 1;
        apply(&mut u, &[entry(ListPricingCategory::Bedrooms, "1", 5_000)]);
        assert_eq!(u.premiums[0].name, "1 Bedroom");

        let mut u = unit();
        apply(&mut u, &[entry(ListPricingCategory::Bedrooms, "2", 5_000)]);
        assert_eq!(u.premiums[0].name, "2 Bedrooms");
    }

    #[test]
    fn bathroom_labels_pluralize() {
        let mut u = unit();
        u.bathrooms = Decimal::ONE;
        apply(&mut u, &[entry(ListPricingCategory::Bathrooms, "1", 7_500)]);
        assert_eq!(u.premiums[0].name, "1 Bathroom");

        let mut u = unit();
        u.bathrooms = Decimal::from(2);
        apply(&mut u, &[entry(ListPricingCategory::Bathrooms, "2", 7_500)]);
        assert_eq!(u.premiums[0].name, "2 Bathrooms");
    }

    #[test]
    fn bathroom_values_compare_numerically() {
        let mut u = unit();
        apply(&mut u, &[entry(ListPricingCategory::Bathrooms, "2.5", 7_500)]);
        assert_eq!(u.premiums[0].name, "2.5 Bathrooms");
        assert_eq!(u.final_price, Decimal::from(1_207_500));
    }

    #[test]
    fn sqft_bands_are_inclusive_and_grouped() {
        let mut u = unit();
        apply(&mut u, &[entry(ListPricingCategory::Sqft, "1000-1200", 15_000)]);
        assert_eq!(u.premiums[0].name, "1,000 - 1,200 sqft");
        assert_eq!(u.premiums[0].id, "list-sqft-1000-1200");

        let mut u = unit();
        apply(&mut u, &[entry(ListPricingCategory::Sqft, "1201-1500", 15_000)]);
        assert!(u.premiums.is_empty());
    }

    #[test]
    fn zero_outdoor_band_is_no_outdoor_space() {
        let mut u = unit();
        u.outdoor_sqft = Decimal::ZERO;
        apply(&mut u, &[entry(ListPricingCategory::Outdoor, "0-0", -10_000)]);
        assert_eq!(u.premiums[0].name, "No outdoor space");
        assert_eq!(u.final_price, Decimal::from(1_190_000));
    }

    #[test]
    fn malformed_values_match_nothing() {
        let mut u = unit();
        let items = vec![
            entry(ListPricingCategory::Sqft, "big-units", 10_000),
            entry(ListPricingCategory::Sqft, "1200", 10_000),
            entry(ListPricingCategory::Bedrooms, "2x", 10_000),
            entry(ListPricingCategory::Bathrooms, "two", 10_000),
        ];
        apply(&mut u, &items);
        assert!(u.premiums.is_empty());
        assert_eq!(u.final_price, Decimal::from(1_200_000));
    }

    #[test]
    fn zero_adjustments_are_placeholders() {
        let mut u = unit();
        apply(&mut u, &[entry(ListPricingCategory::PlanType, "B2", 0)]);
        assert!(u.premiums.is_empty());
    }

    #[test]
    fn base_pricing_entries_are_not_flat_adjustments() {
        let mut u = unit();
        let items = vec![
            entry(ListPricingCategory::BasePricingPlan, "B2", 1_400),
            entry(ListPricingCategory::BasePricingFloor, "3", 1_400),
        ];
        apply(&mut u, &items);
        assert!(u.premiums.is_empty());
        assert_eq!(u.final_price, Decimal::from(1_200_000));
    }
}
