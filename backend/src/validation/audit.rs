//! Authoring audit for the airline data directory.
//!
//! Stricter than loading: this is what a data editor runs before committing.
//! It reports problems the loader would silently drop, plus editorial
//! checks (conditions length, calendar dates, file naming) that never affect
//! what the loader accepts.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;

use super::schema::validate_airline_document;
use super::validate;
use crate::catalog::list_data_files;
use crate::error::RejectReason;
use crate::parser::read_json_file;

/// Longest `conditions` text that still reads as a label.
pub const MAX_CONDITIONS_LEN: usize = 140;

/// File names starting with this prefix are templates and are not audited.
pub const TEMPLATE_PREFIX: char = '_';

/// Problem with one fee row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", content = "detail", rename_all = "snake_case")]
pub enum FeeIssue {
    /// The runtime loader would omit this row.
    Rejected(String),
    ConditionsTooLong(usize),
    /// Matches `YYYY-MM-DD` but is not a calendar date.
    ImpossibleDate(String),
    FutureDate(String),
}

impl fmt::Display for FeeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeeIssue::Rejected(code) => f.write_str(code),
            FeeIssue::ConditionsTooLong(len) => {
                write!(f, "conditions_too_long({} > {})", len, MAX_CONDITIONS_LEN)
            }
            FeeIssue::ImpossibleDate(d) => write!(f, "impossible_last_verified({})", d),
            FeeIssue::FutureDate(d) => write!(f, "future_last_verified({})", d),
        }
    }
}

/// Problem with one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    Unreadable { reason: String },
    Schema { message: String },
    Fee { index: usize, issue: FeeIssue },
    FilenameMismatch { expected: String },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Unreadable { reason } => f.write_str(reason),
            Finding::Schema { message } => write!(f, "schema: {}", message),
            Finding::Fee { index, issue } => write!(f, "fees[{}]: {}", index, issue),
            Finding::FilenameMismatch { expected } => {
                write!(f, "filename_mismatch(expected_{})", expected)
            }
        }
    }
}

/// Audit result for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAudit {
    pub file: String,
    pub findings: Vec<Finding>,
}

impl FileAudit {
    pub fn is_ok(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Audit result for a data directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub files: Vec<FileAudit>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.files.iter().all(FileAudit::is_ok)
    }

    /// Number of files with at least one finding.
    pub fn bad_file_count(&self) -> usize {
        self.files.iter().filter(|f| !f.is_ok()).count()
    }
}

/// Audit every non-template `*.json` file in `dir`, in sorted order.
pub fn audit_dir(dir: &Path, today: NaiveDate) -> std::io::Result<AuditReport> {
    let files = list_data_files(dir)?;
    let mut report = AuditReport::default();

    for file in files.into_iter().filter(|f| !f.starts_with(TEMPLATE_PREFIX)) {
        let findings = match read_json_file(dir.join(&file)) {
            Ok(doc) => audit_document(&file, &doc, today),
            Err(e) => vec![Finding::Unreadable { reason: e.to_string() }],
        };
        report.files.push(FileAudit { file, findings });
    }

    Ok(report)
}

/// Audit one parsed document.
pub fn audit_document(file_name: &str, doc: &Value, today: NaiveDate) -> Vec<Finding> {
    let mut findings: Vec<Finding> = match validate_airline_document(doc) {
        Ok(()) => Vec::new(),
        Err(messages) => messages
            .into_iter()
            .map(|message| Finding::Schema { message })
            .collect(),
    };

    if let Some(fees) = doc.get("fees").and_then(Value::as_array) {
        for (index, fee) in fees.iter().enumerate() {
            findings.extend(
                audit_fee(fee, today)
                    .into_iter()
                    .map(|issue| Finding::Fee { index, issue }),
            );
        }
    }

    if let Some(slug) = doc.get("slug").and_then(Value::as_str).filter(|s| !s.is_empty()) {
        let expected = format!("{}.json", slug);
        if file_name != expected {
            findings.push(Finding::FilenameMismatch { expected });
        }
    }

    findings
}

/// Issues with one fee entry.
pub fn audit_fee(fee: &Value, today: NaiveDate) -> Vec<FeeIssue> {
    let mut issues = Vec::new();

    if let Err(reason) = validate(fee) {
        issues.push(FeeIssue::Rejected(reason.code().to_string()));
        if reason == RejectReason::InvalidRow {
            return issues;
        }
    }

    if let Some(conditions) = fee.get("conditions").and_then(Value::as_str) {
        let len = conditions.chars().count();
        if len > MAX_CONDITIONS_LEN {
            issues.push(FeeIssue::ConditionsTooLong(len));
        }
    }

    if let Some(date) = fee.get("last_verified").and_then(Value::as_str) {
        if super::is_iso_date(date) {
            match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                Ok(parsed) if parsed > today => issues.push(FeeIssue::FutureDate(date.to_string())),
                Ok(_) => {}
                Err(_) => issues.push(FeeIssue::ImpossibleDate(date.to_string())),
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn fee() -> Value {
        json!({
            "category": "seat_selection",
            "amount": "Varies",
            "currency": "USD",
            "conditions": "Preferred seats",
            "timing": "at booking",
            "source_url": "https://example.com/seats",
            "last_verified": "2025-01-05"
        })
    }

    fn doc(slug: &str, fees: Vec<Value>) -> Value {
        json!({ "slug": slug, "name": "Example Air", "fees": fees })
    }

    #[test]
    fn test_clean_document() {
        assert!(audit_document("example.json", &doc("example", vec![fee()]), today()).is_empty());
    }

    #[test]
    fn test_filename_mismatch() {
        let findings = audit_document("other.json", &doc("example", vec![]), today());
        assert_eq!(
            findings,
            vec![Finding::FilenameMismatch { expected: "example.json".into() }]
        );
        assert_eq!(findings[0].to_string(), "filename_mismatch(expected_example.json)");
    }

    #[test]
    fn test_long_conditions_flagged_not_rejected() {
        let mut long = fee();
        long["conditions"] = json!("x".repeat(MAX_CONDITIONS_LEN + 1));
        let issues = audit_fee(&long, today());
        assert_eq!(issues, vec![FeeIssue::ConditionsTooLong(MAX_CONDITIONS_LEN + 1)]);
        assert!(validate(&long).is_ok());
    }

    #[test]
    fn test_calendar_dates() {
        let mut impossible = fee();
        impossible["last_verified"] = json!("2025-02-30");
        assert_eq!(
            audit_fee(&impossible, today()),
            vec![FeeIssue::ImpossibleDate("2025-02-30".into())]
        );

        let mut future = fee();
        future["last_verified"] = json!("2026-01-01");
        assert_eq!(audit_fee(&future, today()), vec![FeeIssue::FutureDate("2026-01-01".into())]);
    }

    #[test]
    fn test_rejected_row_reported_with_reason() {
        let mut bad = fee();
        bad.as_object_mut().unwrap().remove("currency");
        let findings = audit_document("example.json", &doc("example", vec![bad]), today());

        assert!(findings.iter().any(|f| matches!(f, Finding::Schema { .. })));
        assert!(findings.contains(&Finding::Fee {
            index: 0,
            issue: FeeIssue::Rejected("missing_currency".into()),
        }));
    }

    #[test]
    fn test_audit_dir_skips_templates() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_TEMPLATE.json"), r#"{"slug": "", "name": ""}"#).unwrap();
        fs::write(
            dir.path().join("example.json"),
            serde_json::to_string(&doc("example", vec![fee()])).unwrap(),
        )
        .unwrap();
        fs::write(dir.path().join("broken.json"), "").unwrap();

        let report = audit_dir(dir.path(), today()).unwrap();
        let files: Vec<&str> = report.files.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(files, vec!["broken.json", "example.json"]);
        assert_eq!(report.bad_file_count(), 1);
        assert!(!report.is_clean());
        assert_eq!(report.files[0].findings[0].to_string(), "empty_file");
    }
}
