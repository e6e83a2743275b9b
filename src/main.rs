use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use xlsx_translator::spreadsheet::{load_table, output_file_name, write_table};
use xlsx_translator::{
    AppConfig, GeminiClient, Pacing, Result, RowProcessor, TracingProgress, TranslatorError,
};

#[derive(Debug, Parser)]
#[command(name = "xlsx-translator", version, about = "Translate English spreadsheet rows to German")]
struct Cli {
    /// Spreadsheet (.xlsx or .csv) with 'Key' and 'Text in english to be translated' columns
    input: PathBuf,

    /// Directory for the Translated_<name>.xlsx file (defaults to the input's directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[arg(long)]
    model: Option<String>,

    /// Pause after each row, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Load and validate the file, print a preview, make no API calls
    #[arg(long)]
    dry_run: bool,

    /// Skip the credential check before the first row
    #[arg(long)]
    skip_verify: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(Some(cli.config.as_path()))?;
    if let Some(model) = &cli.model {
        config.api.model = model.clone();
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.pacing.delay_ms = delay_ms;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("xlsx_translator={}", config.logging.level)))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.config.exists() {
        tracing::info!(path = %cli.config.display(), "Loaded configuration");
    } else {
        tracing::debug!(path = %cli.config.display(), "No config file found, using defaults");
    }

    if let Err(err) = run(&cli, &config).await {
        tracing::error!("{}", failure_message(&err));
        return Err(err.into());
    }
    Ok(())
}

async fn run(cli: &Cli, config: &AppConfig) -> Result<()> {
    let client = if cli.dry_run {
        None
    } else {
        let api_key = cli.api_key.clone().ok_or(TranslatorError::MissingCredential)?;
        let client = GeminiClient::new(api_key, &config.api)?;
        if !cli.skip_verify {
            client.verify().await?;
        }
        Some(client)
    };

    let table = load_table(&cli.input).await?;
    tracing::info!("File uploaded successfully! Preview of your data:\n{}", table.preview(5));

    let Some(client) = client else {
        tracing::info!("Dry run, no rows translated");
        return Ok(());
    };

    tracing::info!(model = %client.model(), rows = table.row_count(), "Starting translation");
    let processor = RowProcessor::new(&client, Pacing::from(&config.pacing));
    let (translated, summary) = processor
        .translate_table(table, &config.output.column_name, &mut TracingProgress)
        .await?;

    let output_dir = cli
        .output_dir
        .clone()
        .or_else(|| cli.input.parent().map(PathBuf::from))
        .unwrap_or_default();
    let output_path = output_dir.join(output_file_name(&cli.input));
    write_table(&translated, &config.output.sheet_name, &output_path).await?;

    println!("{}", output_path.display());
    if summary.translated < summary.total {
        tracing::warn!(
            failed = summary.total - summary.translated,
            "Some rows could not be translated; see the sentinel values in the output"
        );
    }

    Ok(())
}

/// Blocking errors stop the run before any row is sent; the rest happen mid-run.
fn failure_message(err: &TranslatorError) -> String {
    if err.is_fatal() {
        format!("Nothing was translated: {}", err)
    } else {
        format!("An error occurred while processing the file: {}", err)
    }
}
