//! Floor label ordering.
//!
//! Floor labels are free-form strings ("Garden", "3", "10B", "Penthouse").
//! Rule evaluation, floor-range multipliers, and revenue grouping must all
//! agree on one vertical order over them, so it lives here: "Garden" sorts
//! first, "Penthouse" sorts last, labels with a leading integer sort by
//! that integer, and everything else falls back to plain string order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Label of the lowest floor, always first in the vertical order.
pub const GARDEN: &str = "Garden";
/// Label of the highest floor, always last in the vertical order.
pub const PENTHOUSE: &str = "Penthouse";

/// A floor label, e.g. "Garden", "3", "10B", "Penthouse".
///
/// `Ord` is the single source of truth for vertical order: sorting a
/// `Vec<FloorId>` or iterating a `BTreeMap<FloorId, _>` walks the building
/// bottom to top.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloorId(pub String);

impl FloorId {
    /// The raw label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FloorId {
    fn from(label: &str) -> Self {
        FloorId(label.to_string())
    }
}

impl From<String> for FloorId {
    fn from(label: String) -> Self {
        FloorId(label)
    }
}

impl fmt::Display for FloorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Ord for FloorId {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_labels(&self.0, &other.0)
    }
}

impl PartialOrd for FloorId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Leading integer of a label ("10B" -> 10), if it has one.
fn int_prefix(label: &str) -> Option<i64> {
    let trimmed = label.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

fn compare_labels(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    if a == GARDEN {
        return Ordering::Less;
    }
    if b == GARDEN {
        return Ordering::Greater;
    }
    if a == PENTHOUSE {
        return Ordering::Greater;
    }
    if b == PENTHOUSE {
        return Ordering::Less;
    }
    match (int_prefix(a), int_prefix(b)) {
        // Suffix labels ("3A" vs "3B") tie on the integer; full string
        // comparison keeps the order total.
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

/// The distinct floors of a snapshot in vertical order, bottom to top.
///
/// The result only contains floors that actually occur in the input;
/// absent floors compress out, which is what floor-range multipliers
/// count against.
pub fn order_floors<I>(labels: I) -> Vec<FloorId>
where
    I: IntoIterator,
    I::Item: Into<FloorId>,
{
    let mut floors: Vec<FloorId> = labels.into_iter().map(Into::into).collect();
    floors.sort();
    floors.dedup();
    floors
}

/// 1-based position of `unit_floor` within the inclusive run from `start`
/// to `end` in `ordered` (as produced by [`order_floors`]).
///
/// Returns `None` when any of the three labels is absent from `ordered`
/// or the unit lies outside the run. An inverted range matches nothing.
pub fn floor_level(
    unit_floor: &FloorId,
    start: &FloorId,
    end: &FloorId,
    ordered: &[FloorId],
) -> Option<usize> {
    let position = |floor: &FloorId| ordered.iter().position(|f| f == floor);
    let start_idx = position(start)?;
    let end_idx = position(end)?;
    let unit_idx = position(unit_floor)?;
    if unit_idx < start_idx || unit_idx > end_idx {
        return None;
    }
    Some(unit_idx - start_idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn floors(labels: &[&str]) -> Vec<FloorId> {
        labels.iter().map(|l| FloorId::from(*l)).collect()
    }

    #[test]
    fn orders_numbered_floors_numerically() {
        let ordered = order_floors(["10", "2", "Penthouse", "Garden", "1", "3"]);
        assert_eq!(ordered, floors(&["Garden", "1", "2", "3", "10", "Penthouse"]));

        let ordered = order_floors(["Penthouse", "Garden", "3", "1"]);
        assert_eq!(ordered, floors(&["Garden", "1", "3", "Penthouse"]));
    }

    #[test]
    fn garden_and_penthouse_bracket_everything() {
        let ordered = order_floors(["Mezzanine", "Penthouse", "7", "Garden"]);
        assert_eq!(ordered.first().unwrap().as_str(), "Garden");
        assert_eq!(ordered.last().unwrap().as_str(), "Penthouse");
    }

    #[test]
    fn integer_prefix_wins_over_string_order() {
        // "9A" is below "10B" even though "10B" sorts first as a string.
        let ordered = order_floors(["10B", "9A"]);
        assert_eq!(ordered, floors(&["9A", "10B"]));
    }

    #[test]
    fn prefix_ties_fall_back_to_string_order() {
        let ordered = order_floors(["3B", "3A", "3"]);
        assert_eq!(ordered, floors(&["3", "3A", "3B"]));
    }

    #[test]
    fn duplicates_collapse() {
        let ordered = order_floors(["2", "1", "2", "1"]);
        assert_eq!(ordered, floors(&["1", "2"]));
    }

    #[test]
    fn level_counts_present_floors_only() {
        // Floors 2 and 4 do not exist in this snapshot, so floor 3 is the
        // second floor of the 1..=5 run, not the third.
        let ordered = floors(&["1", "3", "5"]);
        let level = floor_level(&"3".into(), &"1".into(), &"5".into(), &ordered);
        assert_eq!(level, Some(2));
    }

    #[test]
    fn level_is_one_based_across_the_run() {
        let ordered = floors(&["Garden", "1", "2", "3", "Penthouse"]);
        let level = |f: &str| floor_level(&f.into(), &"1".into(), &"3".into(), &ordered);
        assert_eq!(level("1"), Some(1));
        assert_eq!(level("2"), Some(2));
        assert_eq!(level("3"), Some(3));
        assert_eq!(level("Garden"), None);
        assert_eq!(level("Penthouse"), None);
    }

    #[test]
    fn level_requires_known_floors() {
        let ordered = floors(&["1", "2", "3"]);
        assert_eq!(
            floor_level(&"2".into(), &"1".into(), &"99".into(), &ordered),
            None
        );
        assert_eq!(
            floor_level(&"99".into(), &"1".into(), &"3".into(), &ordered),
            None
        );
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let ordered = floors(&["1", "2", "3"]);
        assert_eq!(
            floor_level(&"2".into(), &"3".into(), &"1".into(), &ordered),
            None
        );
    }

    fn label_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(GARDEN.to_string()),
            Just(PENTHOUSE.to_string()),
            (0u32..40).prop_map(|n| n.to_string()),
            "[A-Z]{1,2}",
        ]
    }

    proptest! {
        #[test]
        fn order_is_independent_of_input_order(
            labels in proptest::collection::vec(label_strategy(), 0..12)
        ) {
            let mut reversed = labels.clone();
            reversed.reverse();
            prop_assert_eq!(order_floors(labels), order_floors(reversed));
        }

        #[test]
        fn garden_first_penthouse_last(
            labels in proptest::collection::vec(label_strategy(), 1..12)
        ) {
            let ordered = order_floors(labels);
            if let Some(pos) = ordered.iter().position(|f| f.as_str() == GARDEN) {
                prop_assert_eq!(pos, 0);
            }
            if let Some(pos) = ordered.iter().position(|f| f.as_str() == PENTHOUSE) {
                prop_assert_eq!(pos, ordered.len() - 1);
            }
        }

        #[test]
        fn level_never_exceeds_run_length(
            labels in proptest::collection::vec(label_strategy(), 1..12),
            pick in any::<prop::sample::Index>(),
        ) {
            let ordered = order_floors(labels);
            let unit = pick.get(&ordered).clone();
            let start = ordered.first().unwrap();
            let end = ordered.last().unwrap();
            let level = floor_level(&unit, start, end, &ordered);
            prop_assert!(level.is_some());
            prop_assert!(level.unwrap() >= 1 && level.unwrap() <= ordered.len());
        }
    }
}
