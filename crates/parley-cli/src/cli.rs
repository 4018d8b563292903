//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use parley_gatekeeper::EvidenceMode;
use parley_notation::RenderFormat;
use std::path::PathBuf;

/// Parley CLI - Generate, validate and inspect negotiation-analysis datasets.
#[derive(Debug, Parser)]
#[command(name = "parley")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PARLEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate analyses for clauses and append them to a dataset
    Generate(GenerateArgs),

    /// Validate every record of a dataset
    Validate(ValidateArgs),

    /// Render dataset records for reading
    Inspect(InspectArgs),

    /// Print the notation legend
    Symbols,
}

/// Evidence mode option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Structured evidence citations only
    Strict,
    /// Freeform evidence summaries accepted
    Loose,
}

/// Inspect output option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InspectFormat {
    /// Glyph notation
    Compact,
    /// English sentences
    Prose,
    /// Validated record as pretty JSON
    Json,
}

/// Arguments for the generate command.
#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Input JSONL file of source clauses
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output JSONL dataset (appended to)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Maximum number of clauses to read from the input
    #[arg(long)]
    pub max_samples: Option<usize>,

    /// Number of input clauses to skip first
    #[arg(long, default_value = "0")]
    pub start_offset: usize,

    /// Process clauses already present in the output again
    #[arg(long)]
    pub no_resume: bool,

    /// Model name (overrides config)
    #[arg(short, long, env = "PARLEY_MODEL")]
    pub model: Option<String>,

    /// Ollama endpoint (overrides config)
    #[arg(long, env = "PARLEY_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Evidence mode (overrides config)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// JSONL dataset to check
    pub file: PathBuf,

    /// Evidence mode (overrides config)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Print warnings for accepted records
    #[arg(short, long)]
    pub warnings: bool,
}

/// Arguments for the inspect command.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// JSONL dataset to read
    pub file: PathBuf,

    /// Show only the record at this 0-based position
    #[arg(short, long)]
    pub sample: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "compact")]
    pub format: InspectFormat,

    /// Omit the source clause block
    #[arg(long)]
    pub hide_original: bool,
}

impl From<ModeArg> for EvidenceMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Strict => EvidenceMode::Strict,
            ModeArg::Loose => EvidenceMode::Loose,
        }
    }
}

impl InspectFormat {
    /// Notation format, unless raw JSON was asked for
    pub fn notation(self) -> Option<RenderFormat> {
        match self {
            InspectFormat::Compact => Some(RenderFormat::Compact),
            InspectFormat::Prose => Some(RenderFormat::Prose),
            InspectFormat::Json => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_command() {
        let cli = Cli::parse_from([
            "parley",
            "generate",
            "--input",
            "clauses.jsonl",
            "--output",
            "out.jsonl",
            "--max-samples",
            "5",
            "--mode",
            "loose",
        ]);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.max_samples, Some(5));
                assert_eq!(args.start_offset, 0);
                assert!(!args.no_resume);
                assert_eq!(args.mode, Some(ModeArg::Loose));
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_inspect_defaults() {
        let cli = Cli::parse_from(["parley", "inspect", "data.jsonl", "--sample", "3", "-vv"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Inspect(args) => {
                assert_eq!(args.sample, Some(3));
                assert_eq!(args.format, InspectFormat::Compact);
                assert!(!args.hide_original);
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_mode_conversion() {
        assert_eq!(EvidenceMode::from(ModeArg::Loose), EvidenceMode::Loose);
        assert_eq!(InspectFormat::Json.notation(), None);
        assert_eq!(InspectFormat::Prose.notation(), Some(RenderFormat::Prose));
    }
}
