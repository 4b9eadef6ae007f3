//! Display-safe values for fee tables.
//!
//! Nothing here adds prose or judgement. Missing values become the
//! "not published" sentinel; conditions are only ever appended to.

use serde::Serialize;

use super::timing::{derive_timing, merge_conditions, NOT_PUBLISHED};
use crate::models::{FeeCategory, FeeRecord, FeeRow};

/// Amount followed by currency, e.g. `35 USD`, `12.50 EUR`, `Varies USD`.
pub fn format_amount(record: &FeeRecord) -> String {
    format!("{} {}", record.amount, record.currency)
}

/// Trimmed value, or the sentinel when absent or blank.
pub fn or_not_published(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_PUBLISHED.to_string(),
    }
}

/// Which derived timing columns a fee table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMode {
    ShowPricingUnit,
    ShowWhenCharged,
    HideBoth,
    ShowBoth,
}

impl ColumnMode {
    /// Choose columns for a set of rows. Mixed or empty sets show both.
    pub fn for_rows(rows: &[FeeRow]) -> Self {
        let mut categories = rows.iter().map(|r| r.item.category);
        let Some(first) = categories.next() else {
            return Self::ShowBoth;
        };
        if categories.any(|c| c != first) {
            return Self::ShowBoth;
        }
        Self::for_category(first)
    }

    pub fn for_category(category: FeeCategory) -> Self {
        match category {
            FeeCategory::CheckedBaggage | FeeCategory::UnaccompaniedMinor => Self::ShowPricingUnit,
            FeeCategory::SeatSelection => Self::ShowWhenCharged,
            FeeCategory::ChangeCancellation => Self::HideBoth,
            _ => Self::ShowBoth,
        }
    }

    pub fn shows_pricing_unit(&self) -> bool {
        matches!(self, Self::ShowPricingUnit | Self::ShowBoth)
    }

    pub fn shows_when_charged(&self) -> bool {
        matches!(self, Self::ShowWhenCharged | Self::ShowBoth)
    }
}

/// One fee row with every column resolved to display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub airline: String,
    pub amount: String,
    pub conditions: String,
    pub applies_to: String,
    pub region_or_route: String,
    pub pricing_unit: String,
    pub when_charged: String,
    pub source_url: String,
    pub last_verified: String,
}

impl DisplayRow {
    pub fn from_row(row: &FeeRow) -> Self {
        let mut display = Self::from_record(&row.item);
        display.airline = row.airline_name.clone();
        display
    }

    /// Display row without an airline column value.
    pub fn from_record(item: &FeeRecord) -> Self {
        let timing = derive_timing(item.timing.as_deref());
        Self {
            airline: String::new(),
            amount: format_amount(item),
            conditions: merge_conditions(&item.conditions, timing.residual.as_deref()),
            applies_to: or_not_published(item.applies_to.as_deref()),
            region_or_route: or_not_published(item.region_or_route.as_deref()),
            pricing_unit: timing.pricing_unit.to_string(),
            when_charged: timing.when_charged.to_string(),
            source_url: item.source_url.clone(),
            last_verified: item.last_verified.clone(),
        }
    }
}
