//! Cross-airline comparison tables.
//!
//! A [`ComparisonSpec`] names a category and up to four substring filters.
//! [`build_comparison_rows`] applies it to a loaded dataset:
//!
//! ```text
//! rows_for_category ──▶ verifiable only ──▶ filters (AND across fields) ──▶ sort by airline
//! ```
//!
//! Within one field a list of needles matches if any needle matches.
//! Matching is case-insensitive substring containment on trimmed text.
//!
//! # Example
//!
//! ```rust,ignore
//! use airline_fees::compare::{build_comparison_rows, ComparisonSpec};
//!
//! let spec = ComparisonSpec::from_json(r#"{
//!     "id": "basic-change-fees",
//!     "title": "Change fees, basic economy",
//!     "category": "change_cancellation",
//!     "filters": { "applies_to_includes": ["Basic Economy", "Basic"] }
//! }"#)?;
//! let rows = build_comparison_rows(&report.airlines, &spec);
//! ```

pub mod tables;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::catalog::rows::{rows_for_category, sort_by_airline_name};
use crate::error::{SpecError, SpecResult};
use crate::models::{Airline, FeeCategory, FeeRecord, FeeRow};

pub use tables::{bag_ordinal_needles, builtin_specs, find_comparison};

// =============================================================================
// Spec definition
// =============================================================================

/// A single needle or a set of needles (any may match).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    One(String),
    Any(Vec<String>),
}

impl FilterValue {
    /// Needles that carry a constraint. Blank needles are ignored.
    fn needles(&self) -> Vec<&str> {
        let all: Vec<&str> = match self {
            FilterValue::One(n) => vec![n.as_str()],
            FilterValue::Any(ns) => ns.iter().map(String::as_str).collect(),
        };
        all.into_iter().filter(|n| !n.trim().is_empty()).collect()
    }

    /// Does `haystack` satisfy this filter? A filter with no needles is vacuously true.
    pub fn matches(&self, haystack: Option<&str>) -> bool {
        let needles = self.needles();
        if needles.is_empty() {
            return true;
        }
        needles.iter().any(|n| includes_ci(haystack, n))
    }
}

impl From<&str> for FilterValue {
    fn from(needle: &str) -> Self {
        FilterValue::One(needle.to_string())
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(needles: Vec<&str>) -> Self {
        FilterValue::Any(needles.into_iter().map(String::from).collect())
    }
}

/// Declared filters. An absent field imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applies_to_includes: Option<FilterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_or_route_includes: Option<FilterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing_includes: Option<FilterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions_includes: Option<FilterValue>,
}

impl Filters {
    /// True when every declared filter matches its field.
    pub fn matches(&self, item: &FeeRecord) -> bool {
        matches_filter(item.applies_to.as_deref(), self.applies_to_includes.as_ref())
            && matches_filter(item.region_or_route.as_deref(), self.region_or_route_includes.as_ref())
            && matches_filter(item.timing.as_deref(), self.timing_includes.as_ref())
            && matches_filter(Some(&item.conditions), self.conditions_includes.as_ref())
    }
}

/// Declarative definition of one comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSpec {
    /// URL-safe identifier.
    pub id: String,
    pub title: String,
    pub category: FeeCategory,
    #[serde(default)]
    pub filters: Filters,
}

impl ComparisonSpec {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// =============================================================================
// Matching
// =============================================================================

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Case-insensitive containment. An absent or empty haystack never matches.
fn includes_ci(haystack: Option<&str>, needle: &str) -> bool {
    match haystack {
        Some(h) if !h.is_empty() => normalize(h).contains(&normalize(needle)),
        _ => false,
    }
}

fn matches_filter(haystack: Option<&str>, filter: Option<&FilterValue>) -> bool {
    filter.map_or(true, |f| f.matches(haystack))
}

/// Rows of `spec.category` that are verifiable and pass every declared filter,
/// sorted by airline name. An empty result is a valid answer.
pub fn build_comparison_rows(airlines: &[Airline], spec: &ComparisonSpec) -> Vec<FeeRow> {
    let mut rows: Vec<FeeRow> = rows_for_category(airlines, spec.category)
        .into_iter()
        .filter(|row| row.item.is_verifiable())
        .filter(|row| spec.filters.matches(&row.item))
        .collect();

    sort_by_airline_name(&mut rows);
    rows
}

// =============================================================================
// Registry
// =============================================================================

/// Built-in comparison specs plus any loaded from a file.
#[derive(Debug, Clone)]
pub struct ComparisonRegistry {
    specs: Vec<ComparisonSpec>,
}

impl ComparisonRegistry {
    /// Registry with the built-in specs only.
    pub fn builtin() -> Self {
        Self {
            specs: builtin_specs().to_vec(),
        }
    }

    /// Add specs from a JSON file holding an array of specs.
    pub fn extend_from_file(&mut self, path: impl AsRef<Path>) -> SpecResult<usize> {
        let specs = load_specs(path)?;
        let added = specs.len();
        self.extend(specs)?;
        Ok(added)
    }

    /// Add specs. Ids must stay unique.
    pub fn extend(&mut self, specs: Vec<ComparisonSpec>) -> SpecResult<()> {
        let mut seen: HashSet<String> = self.specs.iter().map(|s| s.id.clone()).collect();
        for spec in &specs {
            if !seen.insert(spec.id.clone()) {
                return Err(SpecError::DuplicateId(spec.id.clone()));
            }
        }
        self.specs.extend(specs);
        Ok(())
    }

    pub fn list(&self) -> &[ComparisonSpec] {
        &self.specs
    }

    pub fn find(&self, id: &str) -> Option<&ComparisonSpec> {
        self.specs.iter().find(|s| s.id == id)
    }
}

impl Default for ComparisonRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Read an array of comparison specs from a JSON file.
pub fn load_specs(path: impl AsRef<Path>) -> SpecResult<Vec<ComparisonSpec>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;

    fn record(applies_to: Option<&str>, conditions: &str) -> FeeRecord {
        FeeRecord {
            category: FeeCategory::CheckedBaggage,
            amount: Amount::Number(35.into()),
            currency: "USD".into(),
            conditions: conditions.into(),
            applies_to: applies_to.map(String::from),
            region_or_route: Some("US domestic".into()),
            timing: Some("each way".into()),
            source_url: "https://example.com/bags".into(),
            last_verified: "2025-01-05".into(),
            notes: None,
        }
    }

    fn airline(slug: &str, name: &str, fees: Vec<FeeRecord>) -> Airline {
        Airline {
            slug: slug.into(),
            name: name.into(),
            iata: None,
            icao: None,
            country: None,
            region: None,
            fees,
        }
    }

    fn spec(filters: Filters) -> ComparisonSpec {
        ComparisonSpec {
            id: "test".into(),
            title: "Test".into(),
            category: FeeCategory::CheckedBaggage,
            filters,
        }
    }

    fn dataset() -> Vec<Airline> {
        vec![
            airline("united", "United", vec![record(Some("Business"), "1st bag")]),
            airline("delta", "Delta", vec![record(Some("Economy"), "1st bag")]),
        ]
    }

    #[test]
    fn test_any_needle_matches_within_field() {
        let filters = Filters {
            applies_to_includes: Some(vec!["Economy", "Basic"].into()),
            ..Default::default()
        };
        let rows = build_comparison_rows(&dataset(), &spec(filters));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].airline_slug, "delta");
    }

    #[test]
    fn test_no_constraint_keeps_all() {
        let rows = build_comparison_rows(&dataset(), &spec(Filters::default()));
        let names: Vec<&str> = rows.iter().map(|r| r.airline_name.as_str()).collect();
        assert_eq!(names, vec!["Delta", "United"]);
    }

    #[test]
    fn test_all_fields_must_match() {
        let filters = Filters {
            applies_to_includes: Some("economy".into()),
            conditions_includes: Some("2nd".into()),
            ..Default::default()
        };
        assert!(build_comparison_rows(&dataset(), &spec(filters)).is_empty());
    }

    #[test]
    fn test_case_insensitive_substring() {
        let filters = Filters {
            region_or_route_includes: Some("  us DOMESTIC ".into()),
            timing_includes: Some("EACH".into()),
            ..Default::default()
        };
        assert_eq!(build_comparison_rows(&dataset(), &spec(filters)).len(), 2);
    }

    #[test]
    fn test_absent_field_fails_declared_filter() {
        let airlines = vec![airline("a", "A", vec![record(None, "1st bag")])];
        let filters = Filters {
            applies_to_includes: Some("Economy".into()),
            ..Default::default()
        };
        assert!(build_comparison_rows(&airlines, &spec(filters)).is_empty());
    }

    #[test]
    fn test_unverifiable_row_excluded() {
        let mut unverified = record(Some("Economy"), "1st bag");
        unverified.source_url = String::new();
        let mut undated = record(Some("Economy"), "1st bag");
        undated.last_verified = "  ".into();

        let airlines = vec![
            airline("a", "A", vec![unverified]),
            airline("b", "B", vec![undated]),
            airline("c", "C", vec![record(Some("Economy"), "1st bag")]),
        ];
        let rows = build_comparison_rows(&airlines, &spec(Filters::default()));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].airline_slug, "c");
    }

    #[test]
    fn test_blank_filters_are_no_constraint() {
        let filters = Filters {
            applies_to_includes: Some(FilterValue::Any(vec![])),
            conditions_includes: Some("".into()),
            ..Default::default()
        };
        assert_eq!(build_comparison_rows(&dataset(), &spec(filters)).len(), 2);
    }

    #[test]
    fn test_other_category_ignored() {
        let mut seat = record(Some("Economy"), "Seat");
        seat.category = FeeCategory::SeatSelection;
        let airlines = vec![airline("a", "A", vec![seat])];
        assert!(build_comparison_rows(&airlines, &spec(Filters::default())).is_empty());
    }

    #[test]
    fn test_spec_from_json() {
        let spec = ComparisonSpec::from_json(
            r#"{
                "id": "bags",
                "title": "Bags",
                "category": "checked_baggage",
                "filters": {
                    "applies_to_includes": ["Economy", "Main"],
                    "region_or_route_includes": "US domestic"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(spec.category, FeeCategory::CheckedBaggage);
        assert_eq!(
            spec.filters.applies_to_includes,
            Some(FilterValue::Any(vec!["Economy".into(), "Main".into()]))
        );
        assert_eq!(spec.filters.region_or_route_includes, Some(FilterValue::One("US domestic".into())));
        assert!(spec.filters.timing_includes.is_none());
    }

    #[test]
    fn test_spec_without_filters() {
        let spec = ComparisonSpec::from_json(
            r#"{"id": "um", "title": "UM", "category": "unaccompanied_minor"}"#,
        )
        .unwrap();
        assert_eq!(spec.filters, Filters::default());
        assert!(ComparisonSpec::from_json(r#"{"id": "x", "title": "x", "category": "nope"}"#).is_err());
    }

    #[test]
    fn test_registry_rejects_duplicate_ids() {
        let mut registry = ComparisonRegistry::builtin();
        let builtin_count = registry.list().len();
        let duplicate = registry.list()[0].clone();

        let err = registry.extend(vec![duplicate]).unwrap_err();
        assert!(matches!(err, SpecError::DuplicateId(_)));
        assert_eq!(registry.list().len(), builtin_count);

        let mut extra = spec(Filters::default());
        extra.id = "extra-table".into();
        registry.extend(vec![extra]).unwrap();
        assert!(registry.find("extra-table").is_some());
    }

    #[test]
    fn test_registry_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("specs.json");
        std::fs::write(
            &path,
            r#"[{"id": "carry-on-all", "title": "Carry-on", "category": "carry_on"}]"#,
        )
        .unwrap();

        let mut registry = ComparisonRegistry::builtin();
        assert_eq!(registry.extend_from_file(&path).unwrap(), 1);
        assert_eq!(registry.find("carry-on-all").map(|s| s.category), Some(FeeCategory::CarryOn));
    }
}
