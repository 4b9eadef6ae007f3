//! Dataset loader and catalog lookups.
//!
//! ```text
//! data/airlines/*.json ──▶ parser ──▶ validation (per fee) ──▶ Vec<Airline>
//!                             │              │
//!                             └──────┬───────┘
//!                                    ▼
//!                             Vec<Diagnostic>
//! ```
//!
//! Loading never fails as a whole. An unreadable directory yields an empty
//! dataset, a bad file is skipped, a bad fee row is omitted; each of these is
//! reported as a [`Diagnostic`] and the caller decides what to do with them.
//! Nothing is cached: every call reads the directory again.

pub mod rows;

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::error::RejectReason;
use crate::models::{Airline, AirlineSummary, FeeRecord};
use crate::parser::{read_airline_file, RawAirline};
use crate::validation::validate;

pub use rows::{locale_cmp, rows_for_category};

/// Extension of airline data files.
pub const DATA_FILE_EXTENSION: &str = "json";

// =============================================================================
// Diagnostics
// =============================================================================

/// One advisory event produced while loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The data directory itself could not be listed.
    UnreadableDirectory { dir: String, reason: String },
    /// A whole airline file was skipped.
    SkippedFile { file: String, reason: String },
    /// One fee row was dropped by the validator.
    OmittedFee {
        airline: String,
        index: usize,
        #[serde(serialize_with = "serialize_reason")]
        reason: RejectReason,
    },
}

fn serialize_reason<S: serde::Serializer>(reason: &RejectReason, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(reason.code())
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnreadableDirectory { dir, reason } => {
                write!(f, "Cannot read data directory {}: {}", dir, reason)
            }
            Diagnostic::SkippedFile { file, reason } => {
                write!(f, "Skipped file {}: {}", file, reason)
            }
            Diagnostic::OmittedFee { airline, reason, .. } => {
                write!(f, "Omitted fee row airline={} reason={}", airline, reason.code())
            }
        }
    }
}

// =============================================================================
// Load report
// =============================================================================

/// Result of one load cycle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Airlines in file-name order.
    pub airlines: Vec<Airline>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    /// Number of fee rows kept across all airlines.
    pub fn fee_count(&self) -> usize {
        self.airlines.iter().map(|a| a.fees.len()).sum()
    }

    /// Number of fee rows dropped by the validator.
    pub fn omitted_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::OmittedFee { .. }))
            .count()
    }

    /// Number of files skipped entirely.
    pub fn skipped_file_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::SkippedFile { .. }))
            .count()
    }

    pub fn summary(&self) -> String {
        format!(
            "Loaded: {} airlines, {} fee rows, {} rows omitted, {} files skipped",
            self.airlines.len(),
            self.fee_count(),
            self.omitted_count(),
            self.skipped_file_count()
        )
    }
}

// =============================================================================
// Loader
// =============================================================================

/// Load every airline file in `dir`.
///
/// Files are processed in sorted file-name order so the result never depends
/// on directory iteration order.
pub fn load_all<P: AsRef<Path>>(dir: P) -> LoadReport {
    let dir = dir.as_ref();
    let mut report = LoadReport::default();

    let files = match list_data_files(dir) {
        Ok(files) => files,
        Err(e) => {
            report.diagnostics.push(Diagnostic::UnreadableDirectory {
                dir: dir.display().to_string(),
                reason: e.to_string(),
            });
            return report;
        }
    };

    for file in files {
        let raw = match read_airline_file(dir.join(&file)) {
            Ok(raw) => raw,
            Err(e) => {
                report.diagnostics.push(Diagnostic::SkippedFile {
                    file,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let airline = build_airline(raw, &mut report.diagnostics);
        report.airlines.push(airline);
    }

    report
}

/// Sorted names of the `*.json` files in `dir`.
pub fn list_data_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut files: Vec<String> = std::fs::read_dir(dir)?
        .flatten()
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(String::from))
        .filter(|name| {
            Path::new(name)
                .extension()
                .is_some_and(|ext| ext == DATA_FILE_EXTENSION)
        })
        .collect();

    files.sort_by(|a, b| locale_cmp(a, b));
    Ok(files)
}

/// Validate each fee entry and keep the ones that pass, in file order.
fn build_airline(raw: RawAirline, diagnostics: &mut Vec<Diagnostic>) -> Airline {
    let mut fees: Vec<FeeRecord> = Vec::with_capacity(raw.fees.len());

    for (index, entry) in raw.fees.iter().enumerate() {
        match validate(entry) {
            Ok(record) => fees.push(record),
            Err(reason) => diagnostics.push(Diagnostic::OmittedFee {
                airline: raw.slug.clone(),
                index,
                reason,
            }),
        }
    }

    Airline {
        slug: raw.slug,
        name: raw.name,
        iata: raw.iata,
        icao: raw.icao,
        country: raw.country,
        region: raw.region,
        fees,
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Airline slugs, sorted.
pub fn airline_slugs(airlines: &[Airline]) -> Vec<String> {
    let mut slugs: Vec<String> = airlines.iter().map(|a| a.slug.clone()).collect();
    slugs.sort_by(|a, b| locale_cmp(a, b));
    slugs
}

/// Find an airline by exact slug.
pub fn airline_by_slug<'a>(airlines: &'a [Airline], slug: &str) -> Option<&'a Airline> {
    airlines.iter().find(|a| a.slug == slug)
}

/// Identity of every airline, sorted by display name.
pub fn airlines_index(airlines: &[Airline]) -> Vec<AirlineSummary> {
    let mut index: Vec<AirlineSummary> = airlines.iter().map(Airline::summary).collect();
    index.sort_by(|a, b| locale_cmp(&a.name, &b.name));
    index
}
