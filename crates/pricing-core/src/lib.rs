#![deny(warnings)]

//! Core domain records and invariants for the pricing model.
//!
//! This crate defines the serializable scenario, unit, and rule types
//! shared by the pricing engine and its callers, the floor ordering the
//! whole system agrees on, and validation helpers that reject records an
//! import layer should never have produced. The JSON shape matches the
//! scenario documents the configuration frontend exchanges, so exports
//! load back without translation.

pub mod floor;

pub use floor::{floor_level, order_floors, FloorId};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

/// How an adjustment value is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// Flat dollar amount.
    Fixed,
    /// Percent of the price accumulated so far (5 = 5%).
    Percentage,
    /// Dollars per interior square foot.
    PerSqft,
}

/// The effect a rule applies when its criteria match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    /// How `value` is interpreted.
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    /// Dollars, percent points, or $/sqft depending on `kind`.
    pub value: Decimal,
}

/// One itemized price adjustment that was applied to a unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Premium {
    /// Identifier of the originating rule or list entry.
    pub id: String,
    /// Display label shown in price breakdowns.
    pub name: String,
    /// Kind of the originating adjustment.
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    /// Configured scalar, before any floor multiplier.
    pub value: Decimal,
    /// Dollars this premium added to the final price.
    pub amount: Decimal,
}

/// One sellable inventory unit: imported attributes plus computed pricing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Unique unit identifier within a scenario.
    pub id: String,
    /// Floor the unit sits on.
    pub floor: FloorId,
    /// Unit label within the floor, e.g. "2A".
    #[serde(rename = "unit")]
    pub unit_number: String,
    /// Floor plan type, e.g. "B2".
    pub plan_type: String,
    /// Interior area in square feet (> 0).
    pub sqft: Decimal,
    /// Facing, e.g. "North", "Park".
    pub orientation: String,
    /// Outdoor area in square feet (>= 0, 0 when none).
    pub outdoor_sqft: Decimal,
    /// Bedroom count (0 for studios).
    pub bedrooms: u32,
    /// Bathroom count; half baths allowed, e.g. 2.5.
    pub bathrooms: Decimal,
    /// Imported $/sqft before any base-pricing override.
    pub base_price_per_sqft: Decimal,
    /// Imported total price.
    pub base_price: Decimal,
    /// Computed price after the latest repricing pass.
    pub final_price: Decimal,
    /// `final_price / sqft`, recomputed after constraints.
    pub final_price_per_sqft: Decimal,
    /// Itemized adjustments from the latest pass, in application order.
    #[serde(default)]
    pub premiums: Vec<Premium>,
}

/// Inclusive numeric range used by size and outdoor-space criteria.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: Decimal,
    pub max: Decimal,
}

impl Band {
    /// Inclusive membership test.
    pub fn contains(&self, value: Decimal) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Contiguous span of floors a rule scales across.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorRange {
    pub start_floor: FloorId,
    pub end_floor: FloorId,
}

/// Criteria clauses of a rule.
///
/// Every supplied clause must pass (AND); the values inside one clause
/// are alternatives (OR). An empty clause imposes no constraint, so the
/// default criteria match every unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCriteria {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orientations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub floors: Vec<FloorId>,
    /// Interior square footage bands, inclusive on both ends.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub size_bands: Vec<Band>,
    /// Outdoor square footage bands, inclusive on both ends.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outdoor_bands: Vec<Band>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bedroom_counts: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bathroom_counts: Vec<Decimal>,
    /// When set, the adjustment is multiplied by the unit's 1-based level
    /// within this range, and units outside the range never match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_range: Option<FloorRange>,
}

/// A conditional pricing rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    /// Display name, reused as the premium label.
    pub name: String,
    /// Disabled rules are skipped without affecting evaluation order.
    pub enabled: bool,
    /// Evaluation order, ascending; ties keep their configured position.
    pub order: i32,
    pub criteria: RuleCriteria,
    pub adjustment: Adjustment,
}

/// Which list-pricing category drives base price overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasePricingMode {
    /// Override $/sqft per plan type.
    #[default]
    Plan,
    /// Override $/sqft per floor.
    Floor,
}

/// Category a list-pricing entry is keyed by.
///
/// The two base-pricing categories carry $/sqft rates consumed by the
/// base pricing resolver; the rest carry flat dollar adjustments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListPricingCategory {
    BasePricingPlan,
    BasePricingFloor,
    PlanType,
    Orientation,
    Floor,
    Bedrooms,
    Bathrooms,
    Sqft,
    Outdoor,
}

impl ListPricingCategory {
    /// Flat-adjustment categories, in the order their premiums are applied.
    pub const ADJUSTMENT_ORDER: [ListPricingCategory; 7] = [
        ListPricingCategory::PlanType,
        ListPricingCategory::Orientation,
        ListPricingCategory::Floor,
        ListPricingCategory::Bedrooms,
        ListPricingCategory::Bathrooms,
        ListPricingCategory::Sqft,
        ListPricingCategory::Outdoor,
    ];

    /// Identifier fragment used in list premium ids, e.g. "planType".
    pub fn slug(self) -> &'static str {
        match self {
            ListPricingCategory::BasePricingPlan => "basePricingPlan",
            ListPricingCategory::BasePricingFloor => "basePricingFloor",
            ListPricingCategory::PlanType => "planType",
            ListPricingCategory::Orientation => "orientation",
            ListPricingCategory::Floor => "floor",
            ListPricingCategory::Bedrooms => "bedrooms",
            ListPricingCategory::Bathrooms => "bathrooms",
            ListPricingCategory::Sqft => "sqft",
            ListPricingCategory::Outdoor => "outdoor",
        }
    }
}

/// One categorical adjustment entry keyed by a unit attribute value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListPricingItem {
    pub category: ListPricingCategory,
    /// Attribute value matched against. Band categories (sqft, outdoor)
    /// encode an inclusive range as "{min}-{max}".
    pub value: String,
    /// Flat dollars, or $/sqft for the base-pricing categories.
    /// Exactly zero means the entry is an inert placeholder.
    pub adjustment: Decimal,
}

/// Per-scenario price constraints, applied after rules and list pricing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    /// Lower bound on final $/sqft (>= 0).
    pub min_price_per_sqft: Decimal,
    /// Upper bound on final $/sqft (>= min).
    pub max_price_per_sqft: Decimal,
    /// Increment final prices are rounded to, e.g. 1000. Must be > 0.
    pub rounding_rule: Decimal,
}

impl Default for GlobalSettings {
    /// Constraint values new scenarios start from: $1,100-$1,900 per
    /// sqft, rounded to the nearest $1,000.
    fn default() -> Self {
        GlobalSettings {
            min_price_per_sqft: Decimal::from(1_100),
            max_price_per_sqft: Decimal::from(1_900),
            rounding_rule: Decimal::from(1_000),
        }
    }
}

/// A named what-if pricing configuration with its priced unit snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    /// Display version tag, e.g. "v3".
    pub version: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    /// At most one scenario per project is the baseline that revenue
    /// deltas are measured against. Absent in documents that predate
    /// baselines, so missing means false.
    #[serde(default)]
    pub is_baseline: bool,
    pub rules: Vec<Rule>,
    pub global_settings: GlobalSettings,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list_pricing: Vec<ListPricingItem>,
    #[serde(default)]
    pub base_pricing_mode: BasePricingMode,
    pub units: Vec<Unit>,
}

/// Fixed price band a unit's final price falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceBand {
    #[serde(rename = "Under $1M")]
    UnderOneM,
    #[serde(rename = "$1M-$1.5M")]
    OneToOneHalfM,
    #[serde(rename = "$1.5M-$2M")]
    OneHalfToTwoM,
    #[serde(rename = "Over $2M")]
    OverTwoM,
}

impl PriceBand {
    /// All bands, cheapest first.
    pub const ALL: [PriceBand; 4] = [
        PriceBand::UnderOneM,
        PriceBand::OneToOneHalfM,
        PriceBand::OneHalfToTwoM,
        PriceBand::OverTwoM,
    ];

    /// Band containing `price`. Lower bounds are inclusive: exactly
    /// $1M falls in "$1M-$1.5M".
    pub fn of(price: Decimal) -> PriceBand {
        if price < Decimal::from(1_000_000) {
            PriceBand::UnderOneM
        } else if price < Decimal::from(1_500_000) {
            PriceBand::OneToOneHalfM
        } else if price < Decimal::from(2_000_000) {
            PriceBand::OneHalfToTwoM
        } else {
            PriceBand::OverTwoM
        }
    }

    /// Display label, e.g. "Under $1M".
    pub fn label(self) -> &'static str {
        match self {
            PriceBand::UnderOneM => "Under $1M",
            PriceBand::OneToOneHalfM => "$1M-$1.5M",
            PriceBand::OneHalfToTwoM => "$1.5M-$2M",
            PriceBand::OverTwoM => "Over $2M",
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Read-only revenue aggregate over a scenario's priced units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    /// Sum of final prices across all units.
    pub total_revenue: Decimal,
    /// Absolute difference vs the baseline scenario; zero for the
    /// baseline itself and when no baseline exists.
    pub delta_from_baseline: Decimal,
    /// Delta as a percentage of baseline revenue; zero when baseline
    /// revenue is zero.
    pub delta_percentage: Decimal,
    /// Revenue per floor, keyed bottom to top.
    pub per_floor_revenue: BTreeMap<FloorId, Decimal>,
    /// Revenue per plan type.
    pub per_plan_type_revenue: BTreeMap<String, Decimal>,
    /// Unit counts per price band; every band is present, zero or not.
    pub unit_count_by_price_range: BTreeMap<PriceBand, usize>,
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Unit identifiers must be non-empty.
    #[error("unit id must not be empty")]
    EmptyUnitId,
    /// Interior area must be strictly positive.
    #[error("unit {0}: square footage must be > 0")]
    NonPositiveSqft(String),
    /// Outdoor area may be zero but never negative.
    #[error("unit {0}: outdoor square footage must be >= 0")]
    NegativeOutdoorSqft(String),
    /// Imported prices must be non-negative.
    #[error("unit {0}: negative monetary value")]
    NegativeMoney(String),
    /// Unit identifiers must be unique within a scenario.
    #[error("duplicate unit id: {0}")]
    DuplicateUnitId(String),
    /// Rule identifiers must be non-empty.
    #[error("rule id must not be empty")]
    EmptyRuleId,
    /// Rule names label premiums and must be non-empty.
    #[error("rule {0}: name must not be empty")]
    EmptyRuleName(String),
    /// Rounding requires a positive increment.
    #[error("global settings: rounding rule must be > 0")]
    NonPositiveRoundingRule,
    /// Price-per-sqft constraints must be non-negative.
    #[error("global settings: negative price constraint")]
    NegativeConstraint,
    /// The constraint band must be non-empty.
    #[error("global settings: min price per sqft exceeds max")]
    MinAboveMax,
    /// Only one scenario may be flagged as the baseline.
    #[error("more than one baseline scenario")]
    MultipleBaselines,
}

/// Validate a unit's imported attributes.
pub fn validate_unit(unit: &Unit) -> Result<(), ValidationError> {
    if unit.id.trim().is_empty() {
        return Err(ValidationError::EmptyUnitId);
    }
    if unit.sqft <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveSqft(unit.id.clone()));
    }
    if unit.outdoor_sqft < Decimal::ZERO {
        return Err(ValidationError::NegativeOutdoorSqft(unit.id.clone()));
    }
    if unit.base_price_per_sqft < Decimal::ZERO || unit.base_price < Decimal::ZERO {
        return Err(ValidationError::NegativeMoney(unit.id.clone()));
    }
    Ok(())
}

/// Validate a rule's labeling fields. Criteria need no validation: empty
/// clauses match everything and impossible bands match nothing.
pub fn validate_rule(rule: &Rule) -> Result<(), ValidationError> {
    if rule.id.trim().is_empty() {
        return Err(ValidationError::EmptyRuleId);
    }
    if rule.name.trim().is_empty() {
        return Err(ValidationError::EmptyRuleName(rule.id.clone()));
    }
    Ok(())
}

/// Validate global price constraints.
pub fn validate_settings(settings: &GlobalSettings) -> Result<(), ValidationError> {
    if settings.rounding_rule <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveRoundingRule);
    }
    if settings.min_price_per_sqft < Decimal::ZERO || settings.max_price_per_sqft < Decimal::ZERO {
        return Err(ValidationError::NegativeConstraint);
    }
    if settings.min_price_per_sqft > settings.max_price_per_sqft {
        return Err(ValidationError::MinAboveMax);
    }
    Ok(())
}

/// Validate a scenario, including unit id uniqueness.
pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    validate_settings(&scenario.global_settings)?;
    for rule in &scenario.rules {
        validate_rule(rule)?;
    }
    let mut ids: BTreeSet<&str> = BTreeSet::new();
    for unit in &scenario.units {
        validate_unit(unit)?;
        if !ids.insert(&unit.id) {
            return Err(ValidationError::DuplicateUnitId(unit.id.clone()));
        }
    }
    Ok(())
}

/// Validate a set of scenarios that belong to one project.
pub fn validate_scenarios(scenarios: &[Scenario]) -> Result<(), ValidationError> {
    for scenario in scenarios {
        validate_scenario(scenario)?;
    }
    if scenarios.iter().filter(|s| s.is_baseline).count() > 1 {
        return Err(ValidationError::MultipleBaselines);
    }
    Ok(())
}
