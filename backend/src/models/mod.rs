//! Domain models for the fee catalog.
//!
//! - [`FeeCategory`] - Closed set of fee categories
//! - [`Amount`] - Numeric or short textual fee amount
//! - [`FeeRecord`] - One validated fee row
//! - [`Airline`] - An airline and its validated fee rows
//! - [`AirlineSummary`] - Airline identity without fees, for index views
//! - [`FeeRow`] - A fee record paired with its owning airline
//!
//! Fee records and airlines are only ever built by the validator and the
//! loader; they are never deserialized straight from disk.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

// =============================================================================
// Fee Category
// =============================================================================

/// Type of fee. Keys are stable and must not be renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeCategory {
    CheckedBaggage,
    CarryOn,
    SeatSelection,
    ChangeCancellation,
    SameDayChange,
    SameDayStandby,
    UnaccompaniedMinor,
    OverweightBaggage,
    OversizeBaggage,
}

impl FeeCategory {
    /// All categories, in display order.
    pub const ALL: [FeeCategory; 9] = [
        Self::CheckedBaggage,
        Self::CarryOn,
        Self::SeatSelection,
        Self::ChangeCancellation,
        Self::SameDayChange,
        Self::SameDayStandby,
        Self::UnaccompaniedMinor,
        Self::OverweightBaggage,
        Self::OversizeBaggage,
    ];

    /// Parse a category key. Matching is exact: keys are case-sensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }

    /// Data-file key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CheckedBaggage => "checked_baggage",
            Self::CarryOn => "carry_on",
            Self::SeatSelection => "seat_selection",
            Self::ChangeCancellation => "change_cancellation",
            Self::SameDayChange => "same_day_change",
            Self::SameDayStandby => "same_day_standby",
            Self::UnaccompaniedMinor => "unaccompanied_minor",
            Self::OverweightBaggage => "overweight_baggage",
            Self::OversizeBaggage => "oversize_baggage",
        }
    }

    /// UI label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CheckedBaggage => "Checked baggage",
            Self::CarryOn => "Carry-on",
            Self::SeatSelection => "Seat selection",
            Self::ChangeCancellation => "Change / cancellation",
            Self::SameDayChange => "Same-day change",
            Self::SameDayStandby => "Same-day standby",
            Self::UnaccompaniedMinor => "Unaccompanied minor",
            Self::OverweightBaggage => "Overweight baggage",
            Self::OversizeBaggage => "Oversize baggage",
        }
    }
}

impl fmt::Display for FeeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Amount
// =============================================================================

/// Published fee amount.
///
/// Prefer numbers. Airlines that only publish a range or a sentinel
/// ("Varies", "Not permitted") are kept as short text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Number(Number),
    Text(String),
}

impl fmt::Display for Amount {
    /// Integers print as-is, fractional numbers with two decimals, text verbatim.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) if n.is_i64() || n.is_u64() => write!(f, "{}", n),
            Amount::Number(n) => match n.as_f64() {
                Some(v) if v.fract() == 0.0 => write!(f, "{}", v),
                Some(v) => write!(f, "{:.2}", v),
                None => write!(f, "{}", n),
            },
            Amount::Text(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// Fee Record
// =============================================================================

/// One published fee row that passed validation.
///
/// Free-text fields are stored exactly as they appear in the source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeRecord {
    pub category: FeeCategory,
    pub amount: Amount,
    pub currency: String,
    pub conditions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_or_route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
    pub source_url: String,
    pub last_verified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FeeRecord {
    /// A row is verifiable when it carries both a source URL and a verification date.
    pub fn is_verifiable(&self) -> bool {
        !self.source_url.trim().is_empty() && !self.last_verified.trim().is_empty()
    }
}

// =============================================================================
// Airline
// =============================================================================

/// An airline and the fee rows that survived validation, in file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airline {
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub fees: Vec<FeeRecord>,
}

impl Airline {
    /// Identity fields only.
    pub fn summary(&self) -> AirlineSummary {
        AirlineSummary {
            slug: self.slug.clone(),
            name: self.name.clone(),
            iata: self.iata.clone(),
            icao: self.icao.clone(),
            country: self.country.clone(),
            region: self.region.clone(),
        }
    }

    /// Fee rows of one category, in file order.
    pub fn fees_in(&self, category: FeeCategory) -> impl Iterator<Item = &FeeRecord> {
        self.fees.iter().filter(move |f| f.category == category)
    }
}

/// Airline identity for index and listing views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirlineSummary {
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

// =============================================================================
// Fee Row
// =============================================================================

/// A fee record with the slug and display name of the airline that publishes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeRow {
    pub airline_slug: String,
    pub airline_name: String,
    pub item: FeeRecord,
}

impl FeeRow {
    pub fn new(airline: &Airline, item: &FeeRecord) -> Self {
        Self {
            airline_slug: airline.slug.clone(),
            airline_name: airline.name.clone(),
            item: item.clone(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
