use crate::{env::EnvManager, error::CliError, shutdown::ShutdownCoordinator};
use clap::Parser;
use commands::Commands;
use connectors::sink::{
    GridSink,
    local::{CsvFileSink, StdoutSink},
};
use engine_config::sync::SyncConfig;
use engine_processing::normalizer::Normalizer;
use engine_runtime::execution::executor;
use model::core::timestamp::Timestamp;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod env;
mod error;
mod shutdown;

const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Parser)]
#[command(
    name = "wms-sync",
    version,
    about = "Sync the WMS inventory export to a shared spreadsheet"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Load variables from this .env file (defaults to ./.env when present)"
    )]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Failures are reported in the log; the scheduler always sees a clean exit.
    if let Err(err) = dispatch(cli).await {
        error!("{}", err);
    }
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.env_file.as_deref())?;

    match cli.command.unwrap_or(Commands::Run { dry_run: false }) {
        Commands::Run { dry_run } => {
            let shutdown = ShutdownCoordinator::new(CancellationToken::new());
            shutdown.register_handlers();

            let outcome = executor::run(&config, dry_run, shutdown.cancel_token()).await?;
            if outcome.is_published() {
                info!("{}", outcome);
            } else {
                warn!("Sync did not complete: {}", outcome);
            }
        }
        Commands::Normalize { file, output } => {
            normalize(&config, &file, output).await?;
        }
    }

    Ok(())
}

fn load_config(env_file: Option<&Path>) -> Result<SyncConfig, CliError> {
    let mut env = EnvManager::new();
    match env_file {
        Some(path) => env.load_from_file(path)?,
        None if Path::new(DEFAULT_ENV_FILE).is_file() => env.load_from_file(DEFAULT_ENV_FILE)?,
        None => {}
    }
    Ok(SyncConfig::from_vars(env.all())?)
}

/// Runs the normalizer on a local export. The input file is left in place.
async fn normalize(
    config: &SyncConfig,
    file: &Path,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let normalizer = Normalizer::new(&config.schema)?;
    let normalized = normalizer.normalize_file(file)?;
    let banner = Timestamp::now(config.timezone).banner();

    let sink: Box<dyn GridSink> = match output {
        Some(path) => Box::new(CsvFileSink::new(path)),
        None => Box::new(StdoutSink),
    };
    sink.publish(&banner, &normalized.to_grid()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_run() {
        let cli = Cli::try_parse_from(["wms-sync"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.env_file.is_none());
    }

    #[test]
    fn test_parse_normalize() {
        let cli = Cli::try_parse_from([
            "wms-sync",
            "normalize",
            "zaiko.csv",
            "--output",
            "out.csv",
            "--env-file",
            "prod.env",
        ])
        .unwrap();

        assert_eq!(cli.env_file, Some(PathBuf::from("prod.env")));
        match cli.command {
            Some(Commands::Normalize { file, output }) => {
                assert_eq!(file, PathBuf::from("zaiko.csv"));
                assert_eq!(output, Some(PathBuf::from("out.csv")));
            }
            _ => panic!("expected normalize command"),
        }
    }

    #[test]
    fn test_parse_dry_run() {
        let cli = Cli::try_parse_from(["wms-sync", "run", "--dry-run"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Run { dry_run: true })));
    }

    #[tokio::test]
    async fn test_normalize_keeps_input_and_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("zaiko.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "品番,商品名,実在庫数\nA1,Widget,5\n").unwrap();

        let mut config = SyncConfig::from_vars(&Default::default()).unwrap();
        config.schema.encoding = "UTF-8".to_string();

        normalize(&config, &input, Some(output.clone())).await.unwrap();

        assert!(input.exists());
        let written = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert!(lines[0].starts_with("Last Updated: "));
        assert_eq!(
            &lines[1..],
            &["Product No.,Product Name,Stock", "A1,Widget,5", "Total,,5.0"]
        );
    }
}
