//! Fee record validation.
//!
//! Turns one untyped fee entry (a `serde_json::Value` straight from an airline
//! file) into a typed [`FeeRecord`], or reports the first rule it breaks.
//!
//! # Rules
//!
//! Checked in this order, first failure wins:
//!
//! | # | Field | Rule | Reason |
//! |---|-------|------|--------|
//! | 1 | row | JSON object | `invalid_row` |
//! | 2 | `category` | string in the allowlist | `missing_category` / `invalid_category` |
//! | 3 | `amount` | number or non-empty string | `missing_amount` |
//! | 4 | `currency` | non-empty string | `missing_currency` |
//! | 5 | `conditions` | non-empty string | `missing_conditions` |
//! | 6 | `source_url` | absolute http/https URL | `missing_or_invalid_source_url` |
//! | 7 | `last_verified` | `YYYY-MM-DD` | `missing_or_invalid_last_verified` |
//!
//! Optional labels (`applies_to`, `region_or_route`, `timing`, `notes`) are
//! only type-checked when present. A rejected row is never repaired.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use airline_fees::validation::validate;
//!
//! let row = json!({
//!     "category": "checked_baggage",
//!     "amount": 35,
//!     "currency": "USD",
//!     "conditions": "Economy, 1st bag",
//!     "source_url": "https://example.com/bags",
//!     "last_verified": "2025-01-05"
//! });
//! assert!(validate(&row).is_ok());
//! ```

pub mod audit;
pub mod schema;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{RecordResult, RejectReason};
use crate::models::{Amount, FeeCategory, FeeRecord};

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern"));

/// Validate one raw fee entry.
pub fn validate(raw: &Value) -> RecordResult<FeeRecord> {
    let obj = raw.as_object().ok_or(RejectReason::InvalidRow)?;

    let category = match obj.get("category") {
        Some(Value::String(key)) => {
            FeeCategory::from_key(key).ok_or(RejectReason::InvalidCategory)?
        }
        _ => return Err(RejectReason::MissingCategory),
    };

    let amount = match obj.get("amount") {
        Some(Value::Number(n)) => Amount::Number(n.clone()),
        Some(Value::String(s)) if is_non_empty(s) => Amount::Text(s.clone()),
        _ => return Err(RejectReason::MissingAmount),
    };

    let currency = required_text(obj, "currency").ok_or(RejectReason::MissingCurrency)?;
    let conditions = required_text(obj, "conditions").ok_or(RejectReason::MissingConditions)?;

    let source_url = required_text(obj, "source_url")
        .filter(|s| is_http_url(s))
        .ok_or(RejectReason::MissingOrInvalidSourceUrl)?;

    let last_verified = match obj.get("last_verified") {
        Some(Value::String(s)) if is_iso_date(s) => s.clone(),
        _ => return Err(RejectReason::MissingOrInvalidLastVerified),
    };

    Ok(FeeRecord {
        category,
        amount,
        currency,
        conditions,
        applies_to: optional_text(obj, "applies_to", RejectReason::InvalidAppliesTo)?,
        region_or_route: optional_text(obj, "region_or_route", RejectReason::InvalidRegionOrRoute)?,
        timing: optional_text(obj, "timing", RejectReason::InvalidTiming)?,
        source_url,
        last_verified,
        notes: optional_text(obj, "notes", RejectReason::InvalidNotes)?,
    })
}

/// Quick check: does this raw entry pass validation?
pub fn is_valid(raw: &Value) -> bool {
    validate(raw).is_ok()
}

/// True when the string is exactly `YYYY-MM-DD` (ASCII digits only).
///
/// This is a pattern check; `2025-02-30` passes here.
pub fn is_iso_date(value: &str) -> bool {
    ISO_DATE.is_match(value)
}

/// True when the string parses as an absolute `http` or `https` URL with a host.
pub fn is_http_url(value: &str) -> bool {
    match url::Url::parse(value.trim()) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}

fn is_non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

fn required_text(obj: &Map<String, Value>, field: &str) -> Option<String> {
    match obj.get(field) {
        Some(Value::String(s)) if is_non_empty(s) => Some(s.clone()),
        _ => None,
    }
}

/// Absent and `null` both mean "not published". Any other non-string is a rejection.
fn optional_text(
    obj: &Map<String, Value>,
    field: &str,
    reason: RejectReason,
) -> RecordResult<Option<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_row() -> Value {
        json!({
            "category": "checked_baggage",
            "amount": 35,
            "currency": "USD",
            "conditions": "Economy (non-Basic), US domestic, 1st checked bag",
            "applies_to": "Economy",
            "region_or_route": "US domestic",
            "timing": "each way",
            "source_url": "https://www.example-air.com/baggage",
            "last_verified": "2025-01-05"
        })
    }

    fn without(field: &str) -> Value {
        let mut row = complete_row();
        row.as_object_mut().unwrap().remove(field);
        row
    }

    fn with(field: &str, value: Value) -> Value {
        let mut row = complete_row();
        row.as_object_mut().unwrap().insert(field.to_string(), value);
        row
    }

    #[test]
    fn test_complete_row_accepted() {
        let record = validate(&complete_row()).unwrap();
        assert_eq!(record.category, FeeCategory::CheckedBaggage);
        assert_eq!(record.amount, Amount::Number(35.into()));
        assert_eq!(record.applies_to.as_deref(), Some("Economy"));
        assert_eq!(record.timing.as_deref(), Some("each way"));
        assert!(record.notes.is_none());
    }

    #[test]
    fn test_each_missing_required_field_rejected() {
        let cases = [
            ("category", RejectReason::MissingCategory),
            ("amount", RejectReason::MissingAmount),
            ("currency", RejectReason::MissingCurrency),
            ("conditions", RejectReason::MissingConditions),
            ("source_url", RejectReason::MissingOrInvalidSourceUrl),
            ("last_verified", RejectReason::MissingOrInvalidLastVerified),
        ];
        for (field, reason) in cases {
            assert_eq!(validate(&without(field)), Err(reason), "field {}", field);
        }
    }

    #[test]
    fn test_non_object_rejected() {
        assert_eq!(validate(&json!("row")), Err(RejectReason::InvalidRow));
        assert_eq!(validate(&json!(null)), Err(RejectReason::InvalidRow));
        assert_eq!(validate(&json!([1, 2])), Err(RejectReason::InvalidRow));
    }

    #[test]
    fn test_category_allowlist() {
        let bad = with("category", json!("not_a_real_category"));
        assert_eq!(validate(&bad), Err(RejectReason::InvalidCategory));

        let wrong_type = with("category", json!(3));
        assert_eq!(validate(&wrong_type), Err(RejectReason::MissingCategory));

        let good = with("category", json!("oversize_baggage"));
        assert_eq!(validate(&good).unwrap().category, FeeCategory::OversizeBaggage);
    }

    #[test]
    fn test_first_failure_wins() {
        let mut row = without("currency");
        row.as_object_mut().unwrap().insert("category".into(), json!("nope"));
        assert_eq!(validate(&row), Err(RejectReason::InvalidCategory));
    }

    #[test]
    fn test_amount_variants() {
        assert!(validate(&with("amount", json!("Varies"))).is_ok());
        assert!(validate(&with("amount", json!("Not permitted"))).is_ok());
        assert!(validate(&with("amount", json!(0))).is_ok());
        assert!(validate(&with("amount", json!(12.5))).is_ok());
        assert_eq!(validate(&with("amount", json!("   "))), Err(RejectReason::MissingAmount));
        assert_eq!(validate(&with("amount", json!(null))), Err(RejectReason::MissingAmount));
        assert_eq!(validate(&with("amount", json!(true))), Err(RejectReason::MissingAmount));
    }

    #[test]
    fn test_blank_text_is_missing() {
        assert_eq!(validate(&with("currency", json!(" "))), Err(RejectReason::MissingCurrency));
        assert_eq!(validate(&with("conditions", json!(""))), Err(RejectReason::MissingConditions));
    }

    #[test]
    fn test_source_url_must_be_http() {
        for bad in ["ftp://example.com/x", "example.com/bags", "https://", "not a url"] {
            assert_eq!(
                validate(&with("source_url", json!(bad))),
                Err(RejectReason::MissingOrInvalidSourceUrl),
                "url {}",
                bad
            );
        }
        assert!(validate(&with("source_url", json!("HTTP://EXAMPLE.COM/fees"))).is_ok());
    }

    #[test]
    fn test_date_format_strict() {
        assert_eq!(
            validate(&with("last_verified", json!("2025-1-5"))),
            Err(RejectReason::MissingOrInvalidLastVerified)
        );
        assert_eq!(
            validate(&with("last_verified", json!("2025-01-05T00:00:00Z"))),
            Err(RejectReason::MissingOrInvalidLastVerified)
        );
        assert!(validate(&with("last_verified", json!("2025-01-05"))).is_ok());
    }

    #[test]
    fn test_optional_fields_lenient() {
        let mut row = without("applies_to");
        row.as_object_mut().unwrap().remove("region_or_route");
        row.as_object_mut().unwrap().insert("timing".into(), json!(null));
        let record = validate(&row).unwrap();
        assert!(record.applies_to.is_none());
        assert!(record.region_or_route.is_none());
        assert!(record.timing.is_none());
    }

    #[test]
    fn test_optional_field_wrong_type_rejected() {
        assert_eq!(validate(&with("applies_to", json!(1))), Err(RejectReason::InvalidAppliesTo));
        assert_eq!(validate(&with("timing", json!(["at booking"]))), Err(RejectReason::InvalidTiming));
    }

    #[test]
    fn test_conditions_kept_verbatim() {
        let long = format!("  {}  ", "Economy, 1st bag; ".repeat(20));
        let record = validate(&with("conditions", json!(long.clone()))).unwrap();
        assert_eq!(record.conditions, long);
    }

    #[test]
    fn test_is_iso_date_ascii_only() {
        assert!(is_iso_date("2025-12-31"));
        assert!(!is_iso_date("２０２５-01-05"));
        assert!(!is_iso_date(" 2025-01-05"));
    }
}
