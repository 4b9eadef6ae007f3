//! # Airline Fees - validation and comparison pipeline
//!
//! Loads a directory of per-airline JSON files, keeps only fee rows that can
//! be traced to a published source, and derives the rows shown on category
//! and comparison pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ data/*.json │────▶│   Loader    │────▶│  Category   │────▶│ Comparison  │
//! │ (1/airline) │     │ (validate)  │     │    rows     │     │   filters   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                                        │
//!                            ▼                                        ▼
//!                       Diagnostics                     Timing normalizer (per row)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use airline_fees::{load_all, rows_for_category, FeeCategory};
//!
//! let report = load_all("data/airlines");
//! for row in rows_for_category(&report.airlines, FeeCategory::CheckedBaggage) {
//!     println!("{}: {}", row.airline_name, row.item.amount);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error and rejection types
//! - [`models`] - Domain models (FeeRecord, Airline, FeeRow)
//! - [`parser`] - Airline file reading
//! - [`validation`] - Fee record validation, file schema, authoring audit
//! - [`catalog`] - Dataset loader, lookups, category rows
//! - [`transform`] - Timing normalization and display helpers
//! - [`compare`] - Comparison specs and filter engine
//! - [`config`] - Runtime configuration
//! - [`logging`] - Log setup and diagnostic output

// Core modules
pub mod error;
pub mod models;

// Input
pub mod parser;
pub mod validation;

// Dataset
pub mod catalog;

// Derived views
pub mod compare;
pub mod transform;

// Ambient
pub mod config;
pub mod logging;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{AppError, LoadError, LookupError, RejectReason, SpecError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Airline, AirlineSummary, Amount, FeeCategory, FeeRecord, FeeRow};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid, validate};

// =============================================================================
// Re-exports - Catalog
// =============================================================================

pub use catalog::{
    airline_by_slug,
    airline_slugs,
    airlines_index,
    load_all,
    rows_for_category,
    Diagnostic,
    LoadReport,
};

// =============================================================================
// Re-exports - Timing and display
// =============================================================================

pub use transform::{
    derive_timing,
    format_amount,
    merge_conditions,
    ColumnMode,
    DisplayRow,
    TimingDisplay,
    NOT_PUBLISHED,
};

// =============================================================================
// Re-exports - Comparison
// =============================================================================

pub use compare::{
    build_comparison_rows,
    find_comparison,
    ComparisonRegistry,
    ComparisonSpec,
    FilterValue,
    Filters,
};
