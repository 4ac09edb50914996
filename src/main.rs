// src/main.rs
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_srs::{
    fetch_flashcards, fetch_from_all_sources, AppError, CommandLineInput, KnowledgeSource,
    NotionClient, NotionId, NotionSource, RunConfig, RunMode,
};
use serde::Serialize;
use std::fs;

/// Sets up logging configuration.
///
/// The console appender writes to stderr so stdout carries nothing but the
/// JSON result.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_srs.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "[{l}] {m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<(), AppError> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", rendered);
    Ok(())
}

/// Fetches every configured source once and prints the aggregate envelope.
async fn run_aggregation(client: NotionClient, config: &RunConfig) -> Result<(), AppError> {
    let notion = NotionSource::new(client, config.source.clone(), config.settings);
    let sources: [&dyn KnowledgeSource; 1] = [&notion];

    let envelope = fetch_from_all_sources(&sources).await;
    print_json(&envelope, config.compact)
}

/// Prints the flashcards stored under `page`.
async fn run_flashcards(
    client: NotionClient,
    config: &RunConfig,
    page: &NotionId,
) -> Result<(), AppError> {
    let credential = config.source.credential()?;
    let cards = fetch_flashcards(&client, page, &credential).await?;
    print_json(&cards, config.compact)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).map_err(|e| AppError::Logging(e.to_string()))?;

    let config = RunConfig::resolve(cli).context("Invalid command-line arguments")?;
    log::debug!("Resolved configuration: {:?}", config.settings);

    let client = NotionClient::with_reqwest()
        .map_err(|e| AppError::Transport(e.to_string()))?
        .with_timeouts(config.timeouts);

    match &config.mode {
        RunMode::Aggregate => run_aggregation(client, &config).await?,
        RunMode::Flashcards(page) => run_flashcards(client, &config, page)
            .await
            .with_context(|| format!("Failed to extract flashcards from {}", page))?,
    }

    Ok(())
}
