//! Runtime configuration.
//!
//! Values are resolved once at startup, highest priority first:
//!
//! 1. command line flag
//! 2. environment variable (a `.env` file in the working directory is loaded first)
//! 3. built-in default

use std::path::PathBuf;

/// Directory holding one JSON file per airline.
pub const DEFAULT_DATA_DIR: &str = "data/airlines";

/// Overrides [`DEFAULT_DATA_DIR`].
pub const DATA_DIR_ENV: &str = "AIRLINE_FEES_DATA_DIR";

/// Optional JSON file with extra comparison specs.
pub const SPECS_ENV: &str = "AIRLINE_FEES_SPECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub specs_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            specs_file: None,
        }
    }
}

impl Config {
    /// Resolve from flags and the process environment.
    pub fn resolve(data_dir: Option<PathBuf>, specs_file: Option<PathBuf>) -> Self {
        dotenvy::dotenv().ok();
        Self::from_sources(data_dir, specs_file, |key| std::env::var(key).ok())
    }

    /// Resolve from flags and an arbitrary variable lookup.
    pub fn from_sources<F>(data_dir: Option<PathBuf>, specs_file: Option<PathBuf>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = |key: &str| env(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        Self {
            data_dir: data_dir
                .or_else(|| from_env(DATA_DIR_ENV))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            specs_file: specs_file.or_else(|| from_env(SPECS_ENV)),
        }
    }
}
