use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use inventario_tools::catalog::Consolidated;
use inventario_tools::config::NormalizerConfig;
use inventario_tools::ingest;
use inventario_tools::io::excel_write::{self, CATALOG_SHEET, WARNINGS_SHEET};
use inventario_tools::model::{Record, SourceWarning};
use inventario_tools::query::{self, Filter, TableView};
use inventario_tools::{Result, ToolError};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    match cli.command {
        Command::Report(args) => execute_report(args),
        Command::Export(args) => execute_export(args),
    }
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn execute_report(args: ReportArgs) -> Result<()> {
    let config = load_config(args.common.mapping.as_deref())?;
    let consolidated = consolidate_input(&args.common.input, &config)?;
    let filter = args.common.filter();
    let matched = query::filter_records(&consolidated.catalog, &filter);
    let table = query::table_view(&consolidated.catalog, &matched);

    if args.json {
        print_json(&consolidated, &matched, &table)?;
    } else {
        print_table(&table);
        print_summary(&consolidated, matched.len());
        print_warnings(&consolidated.warnings);
    }
    Ok(())
}

fn execute_export(args: ExportArgs) -> Result<()> {
    let config = load_config(args.common.mapping.as_deref())?;
    let consolidated = consolidate_input(&args.common.input, &config)?;
    let filter = args.common.filter();
    let matched = query::filter_records(&consolidated.catalog, &filter);
    let table = query::table_view(&consolidated.catalog, &matched);

    let mut sheets = vec![(CATALOG_SHEET.to_string(), table)];
    if !consolidated.warnings.is_empty() {
        sheets.push((
            WARNINGS_SHEET.to_string(),
            query::warnings_view(&consolidated.warnings),
        ));
    }
    excel_write::write_tables(&args.output, &sheets)?;

    println!(
        "wrote {} records to {}",
        matched.len(),
        args.output.display()
    );
    print_warnings(&consolidated.warnings);
    Ok(())
}

fn consolidate_input(input: &Path, config: &NormalizerConfig) -> Result<Consolidated> {
    if !input.exists() {
        return Err(ToolError::MissingInput(input.to_path_buf()));
    }
    let consolidated = ingest::consolidate_directory(input, config)?;
    if consolidated.catalog.is_empty() {
        return Err(ToolError::NoData(describe_empty(&consolidated)));
    }
    Ok(consolidated)
}

fn describe_empty(consolidated: &Consolidated) -> String {
    if !consolidated.warnings.is_empty() {
        let details: Vec<String> = consolidated
            .warnings
            .iter()
            .map(SourceWarning::to_string)
            .collect();
        format!("no source could be normalized ({})", details.join("; "))
    } else if consolidated.sources_processed > 0 {
        "the sources contained no inventory rows".to_string()
    } else {
        "no spreadsheet files found in the input directory".to_string()
    }
}

fn load_config(path: Option<&Path>) -> Result<NormalizerConfig> {
    match path {
        Some(path) => {
            let data = std::fs::read_to_string(path)?;
            let value: Value = serde_json::from_str(&data)?;
            NormalizerConfig::from_json(&value)
        }
        None => Ok(NormalizerConfig::default()),
    }
}

fn print_table(table: &TableView) {
    let mut widths: Vec<usize> = table
        .columns
        .iter()
        .map(|column| column.chars().count())
        .collect();
    for row in &table.rows {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    print_row(&table.columns, &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    print_row(&rule, &widths);
    for row in &table.rows {
        print_row(row, &widths);
    }
}

fn print_row(cells: &[String], widths: &[usize]) {
    let formatted: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    println!("{}", formatted.join("  ").trim_end());
}

fn print_summary(consolidated: &Consolidated, matched: usize) {
    println!();
    println!(
        "{matched} records matched ({} in catalog)",
        consolidated.catalog.len()
    );
    let locations = consolidated.catalog.distinct_locations();
    println!(
        "{} sources processed, {} distinct locations",
        consolidated.sources_processed,
        locations.len()
    );
    if !locations.is_empty() {
        println!("locations: {}", locations.join(", "));
    }
}

fn print_warnings(warnings: &[SourceWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!();
    println!("warnings:");
    for warning in warnings {
        println!("  {}: {}", warning.source, warning.kind);
    }
}

fn print_json(consolidated: &Consolidated, matched: &[&Record], table: &TableView) -> Result<()> {
    let report = JsonReport {
        columns: &table.columns,
        records: matched,
        matched_records: matched.len(),
        total_records: consolidated.catalog.len(),
        sources_processed: consolidated.sources_processed,
        distinct_locations: consolidated.catalog.distinct_locations(),
        warnings: &consolidated.warnings,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    columns: &'a [String],
    records: &'a [&'a Record],
    matched_records: usize,
    total_records: usize,
    sources_processed: usize,
    distinct_locations: Vec<String>,
    warnings: &'a [SourceWarning],
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Consolidate heterogeneous inventory spreadsheets into one catalog."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the consolidated, filtered inventory to stdout.
    Report(ReportArgs),
    /// Write the consolidated inventory to an Excel workbook.
    Export(ExportArgs),
}

#[derive(clap::Args)]
struct CommonArgs {
    /// Directory holding the spreadsheet exports to consolidate.
    #[arg(long, default_value = ".")]
    input: PathBuf,

    /// Only keep records whose LOCATION equals this value.
    #[arg(long)]
    location: Option<String>,

    /// Only keep records containing this term in any field.
    #[arg(long)]
    search: Option<String>,

    /// Optional JSON file overriding the built-in synonym mapping.
    #[arg(long)]
    mapping: Option<PathBuf>,
}

impl CommonArgs {
    fn filter(&self) -> Filter {
        Filter {
            location: self.location.clone(),
            search: self.search.clone(),
        }
    }
}

#[derive(clap::Args)]
struct ReportArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Emit the report as a single JSON document instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct ExportArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output workbook path.
    #[arg(long)]
    output: PathBuf,
}
