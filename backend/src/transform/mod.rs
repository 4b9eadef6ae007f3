//! Display-side normalization.
//!
//! - Timing: classify the free-text `timing` field into pricing unit / when charged
//! - Display: display-safe strings and column selection for fee tables

pub mod display;
pub mod timing;

pub use display::{format_amount, or_not_published, ColumnMode, DisplayRow};
pub use timing::{derive_timing, merge_conditions, TimingAxis, TimingDisplay, NOT_PUBLISHED};
