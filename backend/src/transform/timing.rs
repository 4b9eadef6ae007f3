//! Timing normalization.
//!
//! The `timing` field is free text. Some values name a pricing unit
//! ("each way"), some name the purchase stage ("at booking"), and the rest
//! are rule windows or eligibility text ("60+ days before departure").
//! [`derive_timing`] maps the first two groups onto a fixed vocabulary and
//! hands everything else back as a residual that belongs in the conditions.
//!
//! Rules are evaluated top to bottom and the first match wins. Pricing-unit
//! rules come first. A single value never yields both axes.

use serde::Serialize;

/// Sentinel shown when a value was not published by the airline.
pub const NOT_PUBLISHED: &str = "not published";

/// Separator used when a residual is appended to conditions.
pub const CONDITIONS_SEPARATOR: &str = "; ";

/// Which display axis a rule feeds, and the normalized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingAxis {
    PricingUnit(&'static str),
    WhenCharged(&'static str),
}

#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Whole value equals one of these.
    OneOf(&'static [&'static str]),
    /// Value contains every one of these.
    ContainsAll(&'static [&'static str]),
}

impl Pattern {
    fn matches(&self, value: &str) -> bool {
        match self {
            Pattern::OneOf(options) => options.iter().any(|o| *o == value),
            Pattern::ContainsAll(needles) => needles.iter().all(|n| value.contains(n)),
        }
    }
}

struct TimingRule {
    pattern: Pattern,
    axis: TimingAxis,
}

/// Priority order matters.
const TIMING_RULES: &[TimingRule] = &[
    TimingRule {
        pattern: Pattern::OneOf(&["each way", "one-way", "per direction"]),
        axis: TimingAxis::PricingUnit("per direction"),
    },
    TimingRule {
        pattern: Pattern::ContainsAll(&["at booking", "manage trip"]),
        axis: TimingAxis::WhenCharged("at booking / manage trip"),
    },
    TimingRule {
        pattern: Pattern::OneOf(&["at booking"]),
        axis: TimingAxis::WhenCharged("at booking"),
    },
    TimingRule {
        pattern: Pattern::OneOf(&["manage trip"]),
        axis: TimingAxis::WhenCharged("manage trip"),
    },
    TimingRule {
        pattern: Pattern::OneOf(&["check-in / boarding", "check-in", "boarding"]),
        axis: TimingAxis::WhenCharged("check-in / boarding"),
    },
    TimingRule {
        pattern: Pattern::OneOf(&["at airport"]),
        axis: TimingAxis::WhenCharged("at airport"),
    },
];

/// Derived timing columns for one fee row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimingDisplay {
    pub pricing_unit: &'static str,
    pub when_charged: &'static str,
    /// Text that did not match any rule. Belongs in the conditions column.
    pub residual: Option<String>,
}

impl TimingDisplay {
    fn unpublished(residual: Option<String>) -> Self {
        Self {
            pricing_unit: NOT_PUBLISHED,
            when_charged: NOT_PUBLISHED,
            residual,
        }
    }
}

/// Match a value against the rule table. Case-insensitive, ignores surrounding whitespace.
pub fn classify(raw: &str) -> Option<TimingAxis> {
    let value = raw.trim().to_lowercase();
    TIMING_RULES
        .iter()
        .find(|rule| rule.pattern.matches(&value))
        .map(|rule| rule.axis)
}

/// Derive the pricing-unit and when-charged columns from a raw `timing` value.
pub fn derive_timing(raw: Option<&str>) -> TimingDisplay {
    let raw = raw.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return TimingDisplay::unpublished(None);
    }

    match classify(raw) {
        Some(TimingAxis::PricingUnit(unit)) => TimingDisplay {
            pricing_unit: unit,
            ..TimingDisplay::unpublished(None)
        },
        Some(TimingAxis::WhenCharged(stage)) => TimingDisplay {
            when_charged: stage,
            ..TimingDisplay::unpublished(None)
        },
        None => TimingDisplay::unpublished(Some(raw.to_string())),
    }
}

/// Append a timing residual to the conditions text.
///
/// Idempotent: a residual already contained in `existing` is not added again.
pub fn merge_conditions(existing: &str, residual: Option<&str>) -> String {
    let residual = residual.filter(|r| !r.trim().is_empty());
    let has_existing = !existing.trim().is_empty();

    match residual {
        None if has_existing => existing.to_string(),
        None => NOT_PUBLISHED.to_string(),
        Some(extra) if !has_existing => extra.to_string(),
        Some(extra) if existing.contains(extra) => existing.to_string(),
        Some(extra) => format!("{}{}{}", existing, CONDITIONS_SEPARATOR, extra),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_unit_phrasings() {
        for raw in ["each way", "One-Way", "  per direction "] {
            let t = derive_timing(Some(raw));
            assert_eq!(t.pricing_unit, "per direction", "raw {:?}", raw);
            assert_eq!(t.when_charged, NOT_PUBLISHED);
            assert!(t.residual.is_none());
        }
    }

    #[test]
    fn test_when_charged_phrasings() {
        let cases = [
            ("at booking", "at booking"),
            ("AT BOOKING", "at booking"),
            ("manage trip", "manage trip"),
            ("at booking / manage trip", "at booking / manage trip"),
            ("Online: at booking or via manage trip", "at booking / manage trip"),
            ("check-in", "check-in / boarding"),
            ("boarding", "check-in / boarding"),
            ("check-in / boarding", "check-in / boarding"),
            ("at airport", "at airport"),
        ];
        for (raw, expected) in cases {
            let t = derive_timing(Some(raw));
            assert_eq!(t.when_charged, expected, "raw {:?}", raw);
            assert_eq!(t.pricing_unit, NOT_PUBLISHED);
            assert!(t.residual.is_none());
        }
    }

    #[test]
    fn test_unrecognized_becomes_residual() {
        let t = derive_timing(Some("60+ days before departure"));
        assert_eq!(t.pricing_unit, NOT_PUBLISHED);
        assert_eq!(t.when_charged, NOT_PUBLISHED);
        assert_eq!(t.residual.as_deref(), Some("60+ days before departure"));
    }

    #[test]
    fn test_partial_phrase_is_residual() {
        // Exact-match rules do not fire on longer text.
        let t = derive_timing(Some("at booking only"));
        assert_eq!(t.when_charged, NOT_PUBLISHED);
        assert_eq!(t.residual.as_deref(), Some("at booking only"));
    }

    #[test]
    fn test_empty_and_absent() {
        let expected = TimingDisplay {
            pricing_unit: NOT_PUBLISHED,
            when_charged: NOT_PUBLISHED,
            residual: None,
        };
        assert_eq!(derive_timing(None), expected);
        assert_eq!(derive_timing(Some("")), expected);
        assert_eq!(derive_timing(Some("   ")), expected);
    }

    #[test]
    fn test_classify_first_match_wins() {
        assert_eq!(classify("each way"), Some(TimingAxis::PricingUnit("per direction")));
        assert_eq!(
            classify("manage trip, at booking"),
            Some(TimingAxis::WhenCharged("at booking / manage trip"))
        );
        assert_eq!(classify("before departure"), None);
    }

    #[test]
    fn test_merge_appends_residual() {
        let merged = merge_conditions("Economy; 1st bag", Some("60+ days before departure"));
        assert_eq!(merged, "Economy; 1st bag; 60+ days before departure");
    }

    #[test]
    fn test_merge_idempotent() {
        let residual = Some("60+ days before departure");
        let once = merge_conditions("Economy; 1st bag", residual);
        let twice = merge_conditions(&once, residual);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_without_residual() {
        assert_eq!(merge_conditions("Economy", None), "Economy");
        assert_eq!(merge_conditions("", None), NOT_PUBLISHED);
        assert_eq!(merge_conditions("  ", Some("")), NOT_PUBLISHED);
    }

    #[test]
    fn test_merge_into_empty_conditions() {
        assert_eq!(merge_conditions("", Some("within 24h")), "within 24h");
    }
}
