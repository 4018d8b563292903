//! Generate command implementation.

use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::dataset::{existing_keys, read_clauses, RecordWriter};
use crate::error::Result;
use crate::output::{Formatter, Summary};
use parley_domain::traits::LlmProvider;
use parley_domain::SourceClause;
use parley_gatekeeper::Gatekeeper;
use parley_generator::Generator;
use parley_llm::OllamaProvider;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Execute the generate command.
pub async fn execute_generate(
    args: GenerateArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<Summary> {
    let model = args.model.unwrap_or_else(|| config.llm.model.clone());
    let endpoint = args.endpoint.unwrap_or_else(|| config.llm.endpoint.clone());
    let mut llm = OllamaProvider::new(endpoint, model)
        .with_max_retries(config.llm.http_retries)
        .with_timeout(config.generator.call_timeout());
    if let Some(temperature) = config.llm.temperature {
        llm = llm.with_temperature(temperature);
    }

    let mut validation = config.validation.clone();
    if let Some(mode) = args.mode {
        validation = validation.with_mode(mode.into());
    }

    let generator = Generator::new(llm, Gatekeeper::new(validation), config.generator.clone())?;
    let clauses = read_clauses(&args.input, args.start_offset, args.max_samples)?;

    println!(
        "{}",
        formatter.info(&format!(
            "{} clause(s) from {} (offset {})",
            clauses.len(),
            args.input.display(),
            args.start_offset
        ))
    );

    let summary = run_generation(&generator, &clauses, &args.output, !args.no_resume, formatter).await?;
    println!("{}", formatter.summary_table("Generation", &summary));
    Ok(summary)
}

/// Generate a record per clause, appending accepted ones to `output`.
///
/// With `resume`, clauses whose content key is already in `output` are
/// skipped. A clause that fails is counted and the run continues.
pub async fn run_generation<L>(
    generator: &Generator<L>,
    clauses: &[SourceClause],
    output: &Path,
    resume: bool,
    formatter: &Formatter,
) -> Result<Summary>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    let mut done: HashSet<_> = if resume {
        existing_keys(output)?
    } else {
        HashSet::new()
    };
    if !done.is_empty() {
        info!("Resuming: {} clause(s) already in {}", done.len(), output.display());
    }

    let mut writer = RecordWriter::append(output)?;
    let mut summary = Summary::default();

    for (i, clause) in clauses.iter().enumerate() {
        let key = clause.content_key();
        let label = format!("[{}/{}] {} {}", i + 1, clauses.len(), clause.clause_type, key);

        if resume && done.contains(&key) {
            summary.skipped += 1;
            continue;
        }

        match generator.generate(clause).await {
            Ok(generated) => {
                writer.write(&generated.record)?;
                done.insert(key);
                summary.succeeded += 1;
                summary.warnings += generated.warnings.len();
                println!(
                    "{}",
                    formatter.success(&format!(
                        "{} ({} attempt(s), {} ms)",
                        label, generated.attempts, generated.elapsed_ms
                    ))
                );
                for warning in &generated.warnings {
                    println!("{}", formatter.detail(&warning.to_string()));
                }
            }
            Err(e) => {
                summary.failed += 1;
                println!("{}", formatter.error(&format!("{}: {}", label, e)));
                if let Some(rejection) = e.rejection() {
                    for hint in rejection.repair_hints() {
                        println!("{}", formatter.detail(&hint));
                    }
                }
            }
        }
    }

    Ok(summary)
}
