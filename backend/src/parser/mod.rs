//! Airline file reader.
//!
//! Reads one airline JSON document into [`RawAirline`]: identity fields are
//! extracted, fee entries stay untyped `serde_json::Value`s until the
//! validator sees them. No fee-level logic lives here.

use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{LoadError, LoadResult};

/// An airline document after parsing, before fee validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAirline {
    pub slug: String,
    pub name: String,
    pub iata: Option<String>,
    pub icao: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    /// Fee entries exactly as they appear in the file.
    pub fees: Vec<Value>,
}

/// Read and parse an airline file.
pub fn read_airline_file<P: AsRef<Path>>(path: P) -> LoadResult<RawAirline> {
    let content = std::fs::read_to_string(path.as_ref())?;
    parse_airline(&content)
}

/// Read a file as a JSON value, without looking at its shape.
pub fn read_json_file<P: AsRef<Path>>(path: P) -> LoadResult<Value> {
    let content = std::fs::read_to_string(path.as_ref())?;
    parse_json(&content)
}

/// Parse JSON text, treating blank input as its own error.
pub fn parse_json(content: &str) -> LoadResult<Value> {
    if content.trim().is_empty() {
        return Err(LoadError::EmptyFile);
    }
    Ok(serde_json::from_str(content)?)
}

/// Parse an airline document from JSON text.
///
/// # Example
/// ```ignore
/// use airline_fees::parser::parse_airline;
///
/// let raw = parse_airline(r#"{"slug": "delta", "name": "Delta", "fees": []}"#).unwrap();
/// assert_eq!(raw.slug, "delta");
/// ```
pub fn parse_airline(content: &str) -> LoadResult<RawAirline> {
    let value = parse_json(content)?;
    from_value(value)
}

/// Extract identity and fee entries from a parsed document.
pub fn from_value(value: Value) -> LoadResult<RawAirline> {
    let Value::Object(mut obj) = value else {
        return Err(LoadError::MissingIdentity);
    };

    let slug = identity(&obj, "slug").ok_or(LoadError::MissingIdentity)?;
    let name = identity(&obj, "name").ok_or(LoadError::MissingIdentity)?;

    let fees = match obj.remove("fees") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(LoadError::FeesNotArray),
    };

    Ok(RawAirline {
        slug,
        name,
        iata: label(&obj, "iata"),
        icao: label(&obj, "icao"),
        country: label(&obj, "country"),
        region: label(&obj, "region"),
        fees,
    })
}

fn identity(obj: &Map<String, Value>, field: &str) -> Option<String> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}

fn label(obj: &Map<String, Value>, field: &str) -> Option<String> {
    obj.get(field).and_then(|v| v.as_str()).map(String::from)
}
