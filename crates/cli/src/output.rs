//! Report plumbing. Human-readable text goes to stderr; with `--json`
//! each report line and the final summary go to stdout as JSON lines,
//! so scripts can pipe stdout without scraping prose.

use serde::Serialize;

use quetzal_recon::{summarize, ReportLine, ReportSummary};

use crate::exit_codes::{EXIT_ERROR, EXIT_INCONSISTENT};
use crate::util::CliError;

pub struct Printer {
    json: bool,
    lines: Vec<ReportLine>,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Printer {
            json,
            lines: Vec::new(),
        }
    }

    pub fn section(&self, title: &str) {
        eprintln!();
        eprintln!("== {title} ==");
    }

    pub fn note(&self, message: impl std::fmt::Display) {
        eprintln!("{message}");
    }

    /// Prints classified reconciliations and keeps them for the final
    /// summary.
    pub fn report(
        &mut self,
        lines: Vec<ReportLine>,
        left_name: &str,
        right_name: &str,
    ) -> Result<(), CliError> {
        for line in &lines {
            eprintln!("{}", line.human(left_name, right_name));
            if self.json {
                println!("{}", line.json().map_err(json_err)?);
            }
        }
        self.lines.extend(lines);
        Ok(())
    }

    /// Emits an arbitrary JSON value when in `--json` mode.
    pub fn value<T: Serialize>(&self, value: &T) -> Result<(), CliError> {
        if self.json {
            println!("{}", serde_json::to_string(value).map_err(json_err)?);
        }
        Ok(())
    }

    /// Prints the summary and converts inconsistencies into the audit
    /// exit code.
    pub fn finish(self) -> Result<(), CliError> {
        let summary: ReportSummary = summarize(&self.lines);
        eprintln!();
        eprintln!(
            "{} reconciliations, {} consistent, {} inconsistent",
            summary.total, summary.consistent, summary.inconsistent
        );
        if self.json {
            println!("{}", serde_json::to_string(&summary).map_err(json_err)?);
        }
        if summary.all_consistent() {
            Ok(())
        } else {
            Err(CliError::new(
                EXIT_INCONSISTENT,
                format!(
                    "{} of {} reconciliations inconsistent",
                    summary.inconsistent, summary.total
                ),
            ))
        }
    }
}

fn json_err(e: serde_json::Error) -> CliError {
    CliError::new(EXIT_ERROR, e.to_string())
}
