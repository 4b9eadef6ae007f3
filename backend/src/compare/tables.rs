//! Built-in comparison tables.
//!
//! Titles stay descriptive and neutral. Add a table only when the data has
//! explicit rows for it; the filters never infer a fee.

use once_cell::sync::Lazy;

use super::{ComparisonSpec, FilterValue, Filters};
use crate::models::FeeCategory;

const US_ECONOMY: &[&str] = &["Economy", "Main", "Standard Economy"];
const BASIC_ECONOMY: &[&str] = &["Basic Economy", "Basic"];
const US_DOMESTIC: &[&str] = &["US domestic", "U.S.", "United States"];

/// Common ways airlines phrase "bag 1" / "bag 2" in the conditions field.
///
/// Only ordinals 1 and 2 are defined; anything else gets no needles.
pub fn bag_ordinal_needles(n: u8) -> Vec<String> {
    let needles: &[&str] = match n {
        1 => &["1st", "first", "Bag 1", "1st Bag", "First checked bag"],
        2 => &["2nd", "second", "Bag 2", "2nd Bag", "Second checked bag"],
        _ => &[],
    };
    needles.iter().map(|s| s.to_string()).collect()
}

fn any(needles: &[&str]) -> Option<FilterValue> {
    Some(FilterValue::Any(needles.iter().map(|s| s.to_string()).collect()))
}

fn spec(id: &str, title: &str, category: FeeCategory, filters: Filters) -> ComparisonSpec {
    ComparisonSpec {
        id: id.to_string(),
        title: title.to_string(),
        category,
        filters,
    }
}

static BUILTIN_SPECS: Lazy<Vec<ComparisonSpec>> = Lazy::new(|| {
    vec![
        spec(
            "us-domestic-economy-checked-baggage-bag1-2025",
            "Checked baggage fees: US domestic economy, bag 1 (2025)",
            FeeCategory::CheckedBaggage,
            Filters {
                applies_to_includes: any(US_ECONOMY),
                region_or_route_includes: any(US_DOMESTIC),
                conditions_includes: Some(FilterValue::Any(bag_ordinal_needles(1))),
                ..Default::default()
            },
        ),
        spec(
            "us-domestic-economy-checked-baggage-bag2-2025",
            "Checked baggage fees: US domestic economy, bag 2 (2025)",
            FeeCategory::CheckedBaggage,
            Filters {
                applies_to_includes: any(US_ECONOMY),
                region_or_route_includes: any(US_DOMESTIC),
                conditions_includes: Some(FilterValue::Any(bag_ordinal_needles(2))),
                ..Default::default()
            },
        ),
        spec(
            "us-domestic-basic-economy-checked-baggage-bag1-2025",
            "Checked baggage fees: US domestic basic economy, bag 1 (2025)",
            FeeCategory::CheckedBaggage,
            Filters {
                applies_to_includes: any(BASIC_ECONOMY),
                region_or_route_includes: any(US_DOMESTIC),
                conditions_includes: Some(FilterValue::Any(bag_ordinal_needles(1))),
                ..Default::default()
            },
        ),
        spec(
            "change-cancellation-basic-economy-2025",
            "Change / cancellation fees: basic economy (2025)",
            FeeCategory::ChangeCancellation,
            Filters {
                applies_to_includes: any(BASIC_ECONOMY),
                ..Default::default()
            },
        ),
        spec(
            "unaccompanied-minor-fees-2025",
            "Unaccompanied minor fees (2025)",
            FeeCategory::UnaccompaniedMinor,
            Filters::default(),
        ),
    ]
});

/// The built-in comparison specs, in display order.
pub fn builtin_specs() -> &'static [ComparisonSpec] {
    &BUILTIN_SPECS
}

/// Look up a built-in spec by id.
pub fn find_comparison(id: &str) -> Option<&'static ComparisonSpec> {
    BUILTIN_SPECS.iter().find(|s| s.id == id)
}
