//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::dataset::{read_lines, Line};
use crate::error::{CliError, Result};
use crate::output::{Formatter, Summary};
use parley_domain::Record;
use parley_gatekeeper::{Accepted, ConformanceError, Gatekeeper};

/// Outcome for one dataset line.
pub struct LineReport {
    /// 1-based line number
    pub number: usize,
    /// Validation result
    pub result: std::result::Result<Accepted<Record>, ConformanceError>,
}

/// Validate each line as a record.
pub fn check_lines(lines: &[Line], gatekeeper: &Gatekeeper) -> Vec<LineReport> {
    lines
        .iter()
        .map(|line| LineReport {
            number: line.number,
            result: gatekeeper.validate_str(&line.text),
        })
        .collect()
}

/// Tally line reports.
pub fn summarize(reports: &[LineReport]) -> Summary {
    let mut summary = Summary::default();
    for report in reports {
        match &report.result {
            Ok(accepted) => {
                summary.succeeded += 1;
                summary.warnings += accepted.warnings.len();
            }
            Err(_) => summary.failed += 1,
        }
    }
    summary
}

/// Execute the validate command.
///
/// Fails with [`CliError::Rejected`] when any line is rejected.
pub fn execute_validate(args: ValidateArgs, config: &Config, formatter: &Formatter) -> Result<Summary> {
    let mut validation = config.validation.clone();
    if let Some(mode) = args.mode {
        validation = validation.with_mode(mode.into());
    }
    let gatekeeper = Gatekeeper::new(validation);

    let lines = read_lines(&args.file)?;
    let reports = check_lines(&lines, &gatekeeper);

    for report in &reports {
        match &report.result {
            Ok(accepted) if accepted.is_clean() => {
                println!("{}", formatter.success(&format!("line {}: accepted", report.number)));
            }
            Ok(accepted) => {
                println!(
                    "{}",
                    formatter.warning(&format!(
                        "line {}: accepted with {} warning(s)",
                        report.number,
                        accepted.warnings.len()
                    ))
                );
                if args.warnings {
                    for warning in &accepted.warnings {
                        println!("{}", formatter.detail(&warning.to_string()));
                    }
                }
            }
            Err(error) => {
                println!(
                    "{}",
                    formatter.error(&format!(
                        "line {}: rejected by {} check",
                        report.number, error.class
                    ))
                );
                for hint in error.repair_hints() {
                    println!("{}", formatter.detail(&hint));
                }
            }
        }
    }

    let summary = summarize(&reports);
    println!(
        "{}",
        formatter.summary_table(&format!("Validation ({})", gatekeeper.config().evidence_mode), &summary)
    );

    if summary.failed > 0 {
        return Err(CliError::Rejected {
            rejected: summary.failed,
            total: summary.total(),
        });
    }
    Ok(summary)
}
