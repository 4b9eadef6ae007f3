//! Category row selection.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{Airline, FeeCategory, FeeRow};

/// Primary collation key: decomposed, combining marks dropped, lowercased.
///
/// `"Éire Air"` and `"eire air"` share a key.
pub fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Locale-style order: base letters first, then accents and case, then the
/// exact strings as tie-breaker.
///
/// `"american" < "Delta" < "Éire Air" < "Etihad" < "JetBlue"`.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Sort rows by airline display name. Stable: names with the same
/// collation key keep input order.
pub fn sort_by_airline_name(rows: &mut [FeeRow]) {
    rows.sort_by_cached_key(|row| collation_key(&row.airline_name));
}

/// Every fee row of `category` across all airlines, sorted by airline name.
pub fn rows_for_category(airlines: &[Airline], category: FeeCategory) -> Vec<FeeRow> {
    let mut rows: Vec<FeeRow> = airlines
        .iter()
        .flat_map(|airline| airline.fees_in(category).map(move |item| FeeRow::new(airline, item)))
        .collect();

    sort_by_airline_name(&mut rows);
    rows
}
