use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dossier_client::{ReqwestFetcher, ScraperExtractor};
use dossier_core::traits::ProfileExtractor;
use dossier_core::{
    BatchConfig, BatchCoordinator, Pipeline, ProfileRecord, ProfileService, SourceItem,
    TracingProfileReporter,
};
use dossier_store::{CsvSource, JsonSnapshotWriter, StoreConfig};

#[derive(Parser)]
#[command(name = "dossier", version, about = "Directory profile snapshot scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every profile listed in a CSV file and write one JSON snapshot
    Run {
        /// CSV file with a name and a URL column [env: DOSSIER_INPUT]
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Snapshot path; parent directories are created [env: DOSSIER_OUTPUT]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Header of the name column [env: DOSSIER_NAME_COLUMN]
        #[arg(long)]
        name_column: Option<String>,

        /// Header of the URL column [env: DOSSIER_URL_COLUMN]
        #[arg(long)]
        url_column: Option<String>,

        /// Maximum in-flight requests (default: unbounded)
        #[arg(long, env = "DOSSIER_CONCURRENCY")]
        concurrency: Option<NonZeroUsize>,

        #[command(flatten)]
        http: HttpArgs,
    },

    /// Fetch a single profile page and print the extracted record
    Fetch {
        /// Profile page URL
        #[arg(short, long)]
        url: String,

        /// Label used in logs
        #[arg(short, long, default_value = "")]
        name: String,

        #[command(flatten)]
        http: HttpArgs,
    },

    /// Extract a record from a saved profile page
    Extract {
        /// Path to an HTML file
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(clap::Args)]
struct HttpArgs {
    /// Per-request timeout in seconds (default: none)
    #[arg(long, env = "DOSSIER_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

impl HttpArgs {
    fn fetcher(&self) -> Result<ReqwestFetcher> {
        match self.timeout_secs {
            Some(secs) => ReqwestFetcher::with_timeout(Duration::from_secs(secs)),
            None => ReqwestFetcher::new(),
        }
        .context("Failed to create HTTP client")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dossier=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            output,
            name_column,
            url_column,
            concurrency,
            http,
        } => {
            let mut config = StoreConfig::from_env()?;
            if let Some(input) = input {
                config.input = input;
            }
            if let Some(output) = output {
                config.output = output;
            }
            if let Some(name_column) = name_column {
                config.name_column = name_column;
            }
            if let Some(url_column) = url_column {
                config.url_column = url_column;
            }
            config.validate()?;
            cmd_run(&config, concurrency, &http).await?;
        }
        Commands::Fetch { url, name, http } => {
            cmd_fetch(SourceItem::new(name, url), &http).await?;
        }
        Commands::Extract { file } => {
            cmd_extract(&file)?;
        }
    }

    Ok(())
}

type CliService = ProfileService<ReqwestFetcher, ScraperExtractor, TracingProfileReporter>;

fn service(http: &HttpArgs) -> Result<CliService> {
    let extractor = ScraperExtractor::new().context("Failed to build profile extractor")?;
    Ok(ProfileService::new(
        http.fetcher()?,
        extractor,
        TracingProfileReporter,
    ))
}

async fn cmd_run(
    config: &StoreConfig,
    concurrency: Option<NonZeroUsize>,
    http: &HttpArgs,
) -> Result<()> {
    tracing::info!(
        input = %config.input.display(),
        output = %config.output.display(),
        concurrency = ?concurrency,
        "Starting run"
    );

    let coordinator = BatchCoordinator::new(service(http)?, BatchConfig { concurrency });
    let pipeline = Pipeline::new(
        CsvSource::from_config(config),
        coordinator,
        JsonSnapshotWriter::new(),
        &config.output,
    );

    let summary = pipeline
        .run()
        .await
        .with_context(|| format!("Run failed (input: {})", config.input.display()))?;

    eprintln!(
        "Done: {} of {} profiles written to {} ({} failed)",
        summary.succeeded,
        summary.items,
        summary.output.display(),
        summary.failed()
    );
    Ok(())
}

async fn cmd_fetch(item: SourceItem, http: &HttpArgs) -> Result<()> {
    let record = service(http)?
        .fetch_profile(&item)
        .await
        .map_err(|failure| anyhow::anyhow!("{failure}"))?;
    print_record(&record)
}

fn cmd_extract(file: &Path) -> Result<()> {
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read HTML file: {}", file.display()))?;
    let record = ScraperExtractor::new()
        .and_then(|extractor| extractor.extract(&html))
        .context("Extraction failed")?;
    print_record(&record)
}

fn print_record(record: &ProfileRecord) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}
