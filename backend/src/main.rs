//! Airline Fees CLI - inspect and check the fee dataset
//!
//! # Commands
//!
//! ```bash
//! airline-fees airlines                    # Airline index, sorted by name
//! airline-fees airline delta               # One airline's fees
//! airline-fees categories                  # Category keys and labels
//! airline-fees fees checked_baggage        # All rows of one category
//! airline-fees compare                     # List comparison tables
//! airline-fees compare <id> --format csv   # One comparison table
//! airline-fees check                       # Authoring audit of the data directory
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use airline_fees::config::Config;
use airline_fees::error::AppResult;
use airline_fees::logging::{init_logging, log_diagnostics};
use airline_fees::error::AppError;
use airline_fees::validation::audit::{audit_dir, AuditReport};
use airline_fees::{
    airline_by_slug, airlines_index, build_comparison_rows, load_all, rows_for_category,
    ColumnMode, ComparisonRegistry, DisplayRow, FeeCategory, FeeRow, LoadReport, LookupError,
};

#[derive(Parser)]
#[command(name = "airline-fees")]
#[command(about = "Reference catalog of published airline fees", long_about = None)]
struct Cli {
    /// Directory with one JSON file per airline
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Extra comparison specs (JSON array)
    #[arg(long, global = true)]
    specs: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    format: Format,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List airlines, sorted by name
    Airlines,

    /// Show one airline's fees
    Airline {
        /// Airline slug (file name without .json)
        slug: String,
    },

    /// List fee categories
    Categories,

    /// Show every airline's fees in one category
    Fees {
        /// Category key, e.g. checked_baggage
        category: String,
    },

    /// List comparison tables, or show one
    Compare {
        /// Comparison id
        id: Option<String>,
    },

    /// Check data files before committing them
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::resolve(cli.data_dir.clone(), cli.specs.clone());
    tracing::debug!(data_dir = %config.data_dir.display(), "configuration resolved");

    let result = match &cli.command {
        Commands::Airlines => cmd_airlines(&config, cli.format),
        Commands::Airline { slug } => cmd_airline(&config, slug, cli.format),
        Commands::Categories => cmd_categories(&config, cli.format),
        Commands::Fees { category } => cmd_fees(&config, category, cli.format),
        Commands::Compare { id } => cmd_compare(&config, id.as_deref(), cli.format),
        Commands::Check => cmd_check(&config, cli.format),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

fn load(config: &Config) -> LoadReport {
    let report = load_all(&config.data_dir);
    log_diagnostics(&report.diagnostics);
    tracing::info!("{}", report.summary());
    report
}

fn cmd_airlines(config: &Config, format: Format) -> AppResult<ExitCode> {
    let report = load(config);
    let index = airlines_index(&report.airlines);

    let table = Tabular {
        headers: vec!["Slug", "Name", "IATA", "ICAO", "Country", "Region"],
        rows: index
            .iter()
            .map(|a| {
                vec![
                    a.slug.clone(),
                    a.name.clone(),
                    dash(a.iata.as_deref()),
                    dash(a.icao.as_deref()),
                    dash(a.country.as_deref()),
                    dash(a.region.as_deref()),
                ]
            })
            .collect(),
    };

    emit(format, &index, &table)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_airline(config: &Config, slug: &str, format: Format) -> AppResult<ExitCode> {
    let report = load(config);
    let airline = airline_by_slug(&report.airlines, slug)
        .ok_or_else(|| LookupError::AirlineNotFound(slug.to_string()))?;

    let rows: Vec<FeeRow> = airline.fees.iter().map(|f| FeeRow::new(airline, f)).collect();
    let display: Vec<DisplayRow> = rows.iter().map(DisplayRow::from_row).collect();

    let table = Tabular {
        headers: vec![
            "Category",
            "Amount",
            "Conditions",
            "Applies to",
            "Region / route",
            "Pricing unit",
            "When charged",
            "Source",
            "Last verified",
        ],
        rows: rows
            .iter()
            .zip(&display)
            .map(|(row, d)| {
                vec![
                    row.item.category.label().to_string(),
                    d.amount.clone(),
                    d.conditions.clone(),
                    d.applies_to.clone(),
                    d.region_or_route.clone(),
                    d.pricing_unit.clone(),
                    d.when_charged.clone(),
                    d.source_url.clone(),
                    d.last_verified.clone(),
                ]
            })
            .collect(),
    };

    if format == Format::Table {
        println!("{} ({})", airline.name, airline.slug);
    }
    emit(format, &display, &table)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_categories(config: &Config, format: Format) -> AppResult<ExitCode> {
    #[derive(Serialize)]
    struct CategoryInfo {
        key: &'static str,
        label: &'static str,
        rows: usize,
    }

    let report = load(config);
    let categories: Vec<CategoryInfo> = FeeCategory::ALL
        .iter()
        .map(|c| CategoryInfo {
            key: c.key(),
            label: c.label(),
            rows: rows_for_category(&report.airlines, *c).len(),
        })
        .collect();

    let table = Tabular {
        headers: vec!["Key", "Label", "Rows"],
        rows: categories
            .iter()
            .map(|c| vec![c.key.to_string(), c.label.to_string(), c.rows.to_string()])
            .collect(),
    };

    emit(format, &categories, &table)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_fees(config: &Config, key: &str, format: Format) -> AppResult<ExitCode> {
    let category =
        FeeCategory::from_key(key).ok_or_else(|| LookupError::CategoryNotFound(key.to_string()))?;

    let report = load(config);
    let rows = rows_for_category(&report.airlines, category);

    if format == Format::Table {
        println!("{} fees", category.label());
    }
    emit_fee_rows(format, &rows)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_compare(config: &Config, id: Option<&str>, format: Format) -> AppResult<ExitCode> {
    let mut registry = ComparisonRegistry::builtin();
    if let Some(path) = &config.specs_file {
        let added = registry.extend_from_file(path)?;
        tracing::info!(file = %path.display(), added, "loaded comparison specs");
    }

    let Some(id) = id else {
        let specs = registry.list();
        let table = Tabular {
            headers: vec!["Id", "Category", "Title"],
            rows: specs
                .iter()
                .map(|s| vec![s.id.clone(), s.category.key().to_string(), s.title.clone()])
                .collect(),
        };
        emit(format, &specs, &table)?;
        return Ok(ExitCode::SUCCESS);
    };

    let spec = registry
        .find(id)
        .ok_or_else(|| LookupError::ComparisonNotFound(id.to_string()))?;

    let report = load(config);
    let rows = build_comparison_rows(&report.airlines, spec);

    if format == Format::Table {
        println!("{}", spec.title);
        if rows.is_empty() {
            println!("No verified data available.");
            return Ok(ExitCode::SUCCESS);
        }
    }
    emit_fee_rows(format, &rows)?;
    if format == Format::Table {
        println!(
            "\nOnly rows that match the stated conditions and carry a source and last-verified date are included."
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_check(config: &Config, format: Format) -> AppResult<ExitCode> {
    let today = chrono::Local::now().date_naive();
    let report = audit_dir(&config.data_dir, today).map_err(|source| AppError::DataDir {
        dir: config.data_dir.display().to_string(),
        source,
    })?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Csv => print!("{}", audit_rows(&report).to_csv()?),
        Format::Table => {
            if report.files.is_empty() {
                println!("No airline JSON files found (excluding templates).");
            }
            for file in &report.files {
                if file.is_ok() {
                    println!("OK   {}", file.file);
                } else {
                    println!("BAD  {}", file.file);
                    for finding in &file.findings {
                        println!("     - {}", finding);
                    }
                }
            }
        }
    }

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!(bad_files = report.bad_file_count(), "data check failed");
        Ok(ExitCode::from(2))
    }
}

// =============================================================================
// Output
// =============================================================================

/// Headers and string cells, rendered as a terminal table or CSV.
struct Tabular {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Tabular {
    fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_header(self.headers.clone());
        apply_table_style(&mut table);
        for row in &self.rows {
            table.add_row(row.clone());
        }
        table
    }

    fn to_csv(&self) -> AppResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn emit<T: Serialize + ?Sized>(format: Format, data: &T, table: &Tabular) -> AppResult<()> {
    match format {
        Format::Table => println!("{}", table.to_table()),
        Format::Json => println!("{}", serde_json::to_string_pretty(data)?),
        Format::Csv => print!("{}", table.to_csv()?),
    }
    Ok(())
}

/// Fee rows with the timing columns chosen for their category.
fn emit_fee_rows(format: Format, rows: &[FeeRow]) -> AppResult<()> {
    let mode = ColumnMode::for_rows(rows);
    let display: Vec<DisplayRow> = rows.iter().map(DisplayRow::from_row).collect();

    let mut headers = vec!["Airline", "Amount", "Conditions", "Applies to", "Region / route"];
    if mode.shows_pricing_unit() {
        headers.push("Pricing unit");
    }
    if mode.shows_when_charged() {
        headers.push("When charged");
    }
    headers.extend(["Source", "Last verified"]);

    let table = Tabular {
        headers,
        rows: display
            .iter()
            .map(|d| {
                let mut cells = vec![
                    d.airline.clone(),
                    d.amount.clone(),
                    d.conditions.clone(),
                    d.applies_to.clone(),
                    d.region_or_route.clone(),
                ];
                if mode.shows_pricing_unit() {
                    cells.push(d.pricing_unit.clone());
                }
                if mode.shows_when_charged() {
                    cells.push(d.when_charged.clone());
                }
                cells.push(d.source_url.clone());
                cells.push(d.last_verified.clone());
                cells
            })
            .collect(),
    };

    emit(format, &display, &table)
}

/// One CSV line per finding; clean files get a single `OK` line.
fn audit_rows(report: &AuditReport) -> Tabular {
    let mut rows = Vec::new();
    for file in &report.files {
        if file.is_ok() {
            rows.push(vec![file.file.clone(), "OK".to_string(), String::new()]);
        }
        for finding in &file.findings {
            rows.push(vec![file.file.clone(), "BAD".to_string(), finding.to_string()]);
        }
    }
    Tabular {
        headers: vec!["File", "Status", "Finding"],
        rows,
    }
}

fn dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airline_fees::validation::audit::{FileAudit, Finding};

    fn sample() -> Tabular {
        Tabular {
            headers: vec!["Airline", "Amount"],
            rows: vec![
                vec!["Delta Air Lines".to_string(), "35 USD".to_string()],
                vec!["JetBlue".to_string(), "45 USD".to_string()],
            ],
        }
    }

    #[test]
    fn test_table_output_has_every_cell() {
        let mut table = sample().to_table();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_iter().count(), 2);

        let rendered = table.to_string();
        for cell in ["Airline", "Amount", "Delta Air Lines", "45 USD"] {
            assert!(rendered.contains(cell), "missing {:?} in\n{}", cell, rendered);
        }
    }

    #[test]
    fn test_csv_output_quotes_commas() {
        let mut data = sample();
        data.rows.push(vec!["Acme, Inc".to_string(), "varies".to_string()]);

        let csv = data.to_csv().unwrap();
        assert_eq!(
            csv,
            "Airline,Amount\nDelta Air Lines,35 USD\nJetBlue,45 USD\n\"Acme, Inc\",varies\n"
        );
    }

    #[test]
    fn test_audit_rows_one_line_per_finding() {
        let report = AuditReport {
            files: vec![
                FileAudit {
                    file: "delta.json".into(),
                    findings: vec![],
                },
                FileAudit {
                    file: "acme.json".into(),
                    findings: vec![
                        Finding::FilenameMismatch {
                            expected: "acme-air.json".into(),
                        },
                        Finding::Unreadable {
                            reason: "empty_file".into(),
                        },
                    ],
                },
            ],
        };

        let data = audit_rows(&report);
        assert_eq!(data.headers, vec!["File", "Status", "Finding"]);
        assert_eq!(data.rows.len(), 3);
        assert_eq!(data.rows[0], vec!["delta.json", "OK", ""]);
        assert_eq!(data.rows[1][0], "acme.json");
        assert_eq!(data.rows[1][1], "BAD");
        assert_eq!(data.rows[1][2], "filename_mismatch(expected_acme-air.json)");

        let csv = data.to_csv().unwrap();
        assert!(csv.starts_with("File,Status,Finding\ndelta.json,OK,\n"));
    }
}
