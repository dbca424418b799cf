use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use wordhunt_common::WordhuntError;
use wordhunt_common::observability::{LogConfig, init_logging};
use wordhunt_config::{WordhuntConfig, WordhuntConfigLoader};
use wordhunt_http::{ClientSettings, HttpClient};
use wordhunt_query::QueryLoop;

mod pipeline;

/// Count the words of a web page, then answer queries about them on stdin.
#[derive(Debug, Parser)]
#[command(name = "wordhunt", version)]
struct Cli {
    /// Page to fetch.
    url: Option<String>,

    /// YAML configuration file.
    #[arg(long, env = "WORDHUNT_CONFIG")]
    config: Option<PathBuf>,

    /// Mirror log events to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn required_url(cli: &Cli) -> Result<String, WordhuntError> {
    cli.url.clone().ok_or(WordhuntError::MissingUrl)
}

fn load_config(path: Option<&PathBuf>) -> Result<WordhuntConfig, WordhuntError> {
    let mut loader = WordhuntConfigLoader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader
        .load()
        .map_err(|e| WordhuntError::Config(e.to_string()))
}

fn build_client(cfg: &WordhuntConfig) -> Result<HttpClient, WordhuntError> {
    let settings = ClientSettings {
        connect_timeout: cfg.http.connect_timeout(),
        user_agent: cfg.http.user_agent.clone(),
    };
    Ok(HttpClient::from_settings(&settings)?.with_timeout(cfg.http.timeout()))
}

fn log_settings(cfg: &WordhuntConfig, verbose: bool) -> LogConfig {
    let mut log_config = cfg.logging.to_log_config();
    log_config.emit_stderr |= verbose;
    log_config
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) No URL, no work: bail before touching config or the network.
    let url = required_url(&cli)?;

    // 2) Load config (env wins over file)
    let cfg = load_config(cli.config.as_ref())?;

    // Falls back to stderr when the log directory is unusable.
    let log_path = init_logging(log_settings(&cfg, cli.verbose))?;
    tracing::info!(%url, log_path = ?log_path, "wordhunt.start");

    // 3) Fetch and index; any failure here ends the process.
    let client = build_client(&cfg)?;
    let index = pipeline::fetch_and_index(&client, &url).await?;

    // 4) Blocking console loop until stdin closes.
    let tie_break = cfg.query.tie_break;
    let summary = tokio::task::spawn_blocking(move || {
        let stdin = io::stdin();
        let stdout = io::stdout();
        QueryLoop::new(&index, stdin.lock(), stdout.lock())
            .with_tie_break(tie_break)
            .run()
    })
    .await
    .context("query loop panicked")??;

    tracing::info!(
        lookups = summary.lookups,
        listings = summary.listings,
        "wordhunt.done"
    );
    Ok(())
}
