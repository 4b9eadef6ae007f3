//! JSON Schema contract for whole airline files.
//!
//! This is the authoring-time contract, stricter than the runtime validator:
//! it also checks slug and code formats and rejects unknown shapes early.
//! The loader never consults it.
//!
//! The schema is embedded at compile time from `schemas/airline.json`
//! (JSON Schema Draft 7).

use once_cell::sync::Lazy;
use serde_json::Value;

static AIRLINE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/airline.json"))
        .expect("Invalid embedded schema")
});

/// Validate a JSON value against a JSON schema.
///
/// Returns every violation message, or `Ok(())`.
///
/// # Example
/// ```ignore
/// use serde_json::json;
/// use airline_fees::validation::schema::validate;
///
/// let schema = json!({ "type": "object", "required": ["slug"] });
/// assert!(validate(&schema, &json!({ "slug": "delta" })).is_ok());
/// assert!(validate(&schema, &json!({})).is_err());
/// ```
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator.iter_errors(data).map(|e| e.to_string()).collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The embedded airline file schema.
pub fn airline_schema() -> &'static Value {
    &AIRLINE_SCHEMA
}

/// Validate a parsed airline document against the embedded schema.
pub fn validate_airline_document(data: &Value) -> Result<(), Vec<String>> {
    validate(airline_schema(), data)
}

/// Quick check against the embedded schema.
pub fn is_valid_airline_document(data: &Value) -> bool {
    jsonschema::draft7::is_valid(airline_schema(), data)
}
