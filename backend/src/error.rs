//! Error types for the airline fee pipeline.
//!
//! The hierarchy follows the three failure scopes of the loader:
//!
//! - [`LoadError`] - one airline file could not be used (file-scoped)
//! - [`RejectReason`] - one fee row was omitted (record-scoped)
//! - [`LookupError`] - a requested category, airline or comparison does not exist
//! - [`SpecError`] - a comparison spec file could not be read
//! - [`AppError`] - top-level errors surfaced by the CLI
//!
//! None of these abort a load. The loader turns the first two into
//! [`crate::catalog::Diagnostic`] values and keeps going.

use thiserror::Error;

// =============================================================================
// File-level errors
// =============================================================================

/// Why an airline file was skipped.
///
/// The `Display` text is the reason printed in `Skipped file <name>: <reason>`.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("read_failed: {0}")]
    Read(#[from] std::io::Error),

    /// The file is empty or whitespace only.
    #[error("empty_file")]
    EmptyFile,

    /// The file is not valid JSON.
    #[error("json_parse_failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The document has no usable `slug` or `name`.
    #[error("missing slug/name")]
    MissingIdentity,

    /// `fees` is present but is not an array.
    #[error("fees_not_array")]
    FeesNotArray,
}

// =============================================================================
// Record-level rejections
// =============================================================================

/// Why a fee row was omitted from the dataset.
///
/// Variants are listed in the order the validator checks them; the first
/// failing check decides the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RejectReason {
    #[error("invalid_row")]
    InvalidRow,
    #[error("missing_category")]
    MissingCategory,
    #[error("invalid_category")]
    InvalidCategory,
    #[error("missing_amount")]
    MissingAmount,
    #[error("missing_currency")]
    MissingCurrency,
    #[error("missing_conditions")]
    MissingConditions,
    #[error("missing_or_invalid_source_url")]
    MissingOrInvalidSourceUrl,
    #[error("missing_or_invalid_last_verified")]
    MissingOrInvalidLastVerified,
    #[error("invalid_applies_to")]
    InvalidAppliesTo,
    #[error("invalid_region_or_route")]
    InvalidRegionOrRoute,
    #[error("invalid_timing")]
    InvalidTiming,
    #[error("invalid_notes")]
    InvalidNotes,
}

impl RejectReason {
    /// Stable reason code, as used in diagnostics and reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRow => "invalid_row",
            Self::MissingCategory => "missing_category",
            Self::InvalidCategory => "invalid_category",
            Self::MissingAmount => "missing_amount",
            Self::MissingCurrency => "missing_currency",
            Self::MissingConditions => "missing_conditions",
            Self::MissingOrInvalidSourceUrl => "missing_or_invalid_source_url",
            Self::MissingOrInvalidLastVerified => "missing_or_invalid_last_verified",
            Self::InvalidAppliesTo => "invalid_applies_to",
            Self::InvalidRegionOrRoute => "invalid_region_or_route",
            Self::InvalidTiming => "invalid_timing",
            Self::InvalidNotes => "invalid_notes",
        }
    }
}

// =============================================================================
// Lookup misses
// =============================================================================

/// A key requested by a caller does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Airline not found: {0}")]
    AirlineNotFound(String),

    #[error("Comparison not found: {0}")]
    ComparisonNotFound(String),
}

// =============================================================================
// Comparison spec files
// =============================================================================

/// Errors while reading user-supplied comparison specs.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Failed to read spec file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid spec JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate comparison id: {0}")]
    DuplicateId(String),
}

// =============================================================================
// Top-level errors
// =============================================================================

/// Errors surfaced by the command line front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Spec error: {0}")]
    Spec(#[from] SpecError),

    #[error("Cannot read data directory {dir}: {source}")]
    DataDir {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for reading a single airline file.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for validating a single fee row.
pub type RecordResult<T> = Result<T, RejectReason>;

/// Result type for comparison spec files.
pub type SpecResult<T> = Result<T, SpecError>;

/// Result type for CLI commands.
pub type AppResult<T> = Result<T, AppError>;
