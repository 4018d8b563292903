//! Inspect command implementation.

use crate::cli::{InspectArgs, InspectFormat};
use crate::config::Config;
use crate::dataset::read_lines;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use parley_domain::Record;
use parley_gatekeeper::{EvidenceMode, Gatekeeper};
use parley_notation::{render_analysis, render_record};

/// Render one validated record.
pub fn render(record: &Record, format: InspectFormat, hide_original: bool) -> Result<String> {
    match format.notation() {
        Some(notation) if hide_original => Ok(render_analysis(&record.negotiation_analysis, notation)),
        Some(notation) => Ok(render_record(record, notation)),
        None => Ok(serde_json::to_string_pretty(record)?),
    }
}

/// Execute the inspect command.
///
/// Records are validated in loose mode before rendering; rejected lines are
/// reported and skipped.
pub fn execute_inspect(args: InspectArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let gatekeeper = Gatekeeper::new(config.validation.clone().with_mode(EvidenceMode::Loose));
    let lines = read_lines(&args.file)?;

    let selected = match args.sample {
        Some(index) => {
            let line = lines.get(index).ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "sample {} is out of range ({} record(s))",
                    index,
                    lines.len()
                ))
            })?;
            vec![(index, line)]
        }
        None => lines.iter().enumerate().collect(),
    };

    for (index, line) in selected {
        println!(
            "{}",
            formatter.header(&format!("── record {} (line {}) ──", index, line.number))
        );
        match gatekeeper.validate_str(&line.text) {
            Ok(accepted) => {
                println!("{}", render(&accepted.value, args.format, args.hide_original)?);
                for warning in &accepted.warnings {
                    println!("{}", formatter.warning(&warning.to_string()));
                }
            }
            Err(error) => {
                println!("{}", formatter.error(&error.to_string()));
                for hint in error.repair_hints().iter().skip(1) {
                    println!("{}", formatter.detail(hint));
                }
            }
        }
        println!();
    }

    Ok(())
}
