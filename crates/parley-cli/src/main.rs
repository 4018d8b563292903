use clap::Parser;
use parley_cli::{commands, Cli, Command, Config, Formatter, Result};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?;
    let formatter = Formatter::new(!cli.no_color && config.settings.color);

    match cli.command {
        Command::Generate(args) => {
            commands::execute_generate(args, &config, &formatter).await?;
        }
        Command::Validate(args) => {
            commands::execute_validate(args, &config, &formatter)?;
        }
        Command::Inspect(args) => {
            commands::execute_inspect(args, &config, &formatter)?;
        }
        Command::Symbols => commands::execute_symbols(&formatter),
    }

    Ok(())
}
