//! Global price constraints and rounding.

use pricing_core::{GlobalSettings, Unit};
use rust_decimal::RoundingStrategy;

/// Clamps the accumulated price into the configured $/sqft band, rounds
/// it to the configured increment, and recomputes the final $/sqft.
///
/// Both clamps test the $/sqft as it stood before either clamp ran. Units
/// whose base price was overridden by base pricing skip the minimum
/// clamp, so an explicit override may price below the floor; the maximum
/// clamp applies to every unit. Rounding is to the nearest increment,
/// midpoints away from zero.
pub(crate) fn apply(unit: &mut Unit, settings: &GlobalSettings, base_overridden: bool) {
    let price_per_sqft = unit.final_price / unit.sqft;
    if !base_overridden && price_per_sqft < settings.min_price_per_sqft {
        unit.final_price = settings.min_price_per_sqft * unit.sqft;
    }
    if price_per_sqft > settings.max_price_per_sqft {
        unit.final_price = settings.max_price_per_sqft * unit.sqft;
    }
    unit.final_price = (unit.final_price / settings.rounding_rule)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        * settings.rounding_rule;
    unit.final_price_per_sqft = unit.final_price / unit.sqft;
}
