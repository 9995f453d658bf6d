// qzl - budget workbook extraction and audit pipeline

mod audit;
mod check_months;
mod exit_codes;
mod export;
mod inspect;
mod load;
mod output;
mod util;
mod verify;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use quetzal_config::Settings;
use quetzal_core::CellPolicy;

use exit_codes::EXIT_SUCCESS;
use util::{CliError, Context};

#[derive(Parser)]
#[command(name = "qzl")]
#[command(about = "Extracts a budget workbook and audits it against the document store")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to ./quetzal.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Workbook to read (overrides settings)
    #[arg(long, global = true, value_name = "XLSX")]
    workbook: Option<PathBuf>,

    /// Document store path (overrides settings)
    #[arg(long, global = true, value_name = "DB")]
    store: Option<PathBuf>,

    /// Fiscal year stamped onto records and used to filter the store
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Differences strictly below this are consistent
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    /// Read text in numeric cells as zero instead of failing
    #[arg(long, global = true)]
    zero_fill: bool,

    /// Emit machine-readable JSON lines on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every sheet into CSV files plus a manifest
    Extract {
        /// Output directory (overrides settings)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Extract the workbook and replace every stored collection
    Load,

    /// Reconcile workbook totals against the document store
    Audit,

    /// Check month sums and rollup rows inside the workbook
    CheckMonths,

    /// Recompute stored totals and check them for consistency
    Verify,

    /// Describe sheets and show the rows that carry data
    Inspect {
        /// Limit to one sheet and list its significant rows
        #[arg(long)]
        sheet: Option<String>,

        /// Minimum non-blank cells for a row to count
        #[arg(long, default_value_t = 2)]
        threshold: usize,
    },
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(workbook) = &cli.workbook {
        settings.workbook = Some(workbook.clone());
    }
    if let Some(store) = &cli.store {
        settings.store = store.clone();
    }
    if let Some(year) = cli.year {
        settings.year = year;
    }
    if let Some(tolerance) = cli.tolerance {
        settings.tolerance = tolerance;
    }
    if cli.zero_fill {
        settings.cell_policy = CellPolicy::ZeroFill;
    }
    let ctx = Context {
        settings,
        json: cli.json,
    };

    match &cli.command {
        Commands::Extract { out } => export::run(&ctx, out.as_deref()),
        Commands::Load => load::run(&ctx),
        Commands::Audit => audit::run(&ctx),
        Commands::CheckMonths => check_months::run(&ctx),
        Commands::Verify => verify::run(&ctx),
        Commands::Inspect { sheet, threshold } => {
            inspect::run(&ctx, sheet.as_deref(), *threshold)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            ExitCode::from(e.code)
        }
    }
}
