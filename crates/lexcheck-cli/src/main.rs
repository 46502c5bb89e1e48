//! lexcheck CLI
//!
//! Classifies already-extracted document text as legal or illegal and
//! lists compliance issues, printing JSON to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

mod cli;
mod config;
mod source;

use cli::{Cli, Commands};
use config::AppConfig;
use source::{AnalysisReport, SourceDocument};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    let config = AppConfig::load(&cli.config, &cli)?;

    match &cli.command {
        Commands::Classify { file } => {
            let document = read(file)?;
            let result = config.classifier()?.classify_document(&document.text);
            emit(&result, cli.pretty)
        }
        Commands::Comply { file } => {
            let document = read(file)?;
            let issues = config.analyzer()?.analyze_compliance(&document.text);
            emit(&issues, cli.pretty)
        }
        Commands::Analyze { file } => {
            let document = read(file)?;
            let classification = config.classifier()?.classify_document(&document.text);
            let issues = config.analyzer()?.analyze_compliance(&document.text);

            let report = AnalysisReport::new(&document, classification, issues);
            info!(
                file = %report.filename,
                label = %report.classification.label,
                issues = report.issues.len(),
                "Analysis complete"
            );
            emit(&report, cli.pretty)
        }
        Commands::Train => train(&config, cli.pretty),
    }
}

fn read(path: &Path) -> Result<SourceDocument> {
    let document = SourceDocument::read(path)?;
    if document.text.trim().is_empty() {
        warn!(file = %document.filename, "No text in document");
    }
    Ok(document)
}

#[derive(Serialize)]
struct TrainSummary<'a> {
    path: &'a Path,
    persisted: bool,
    classes: Vec<String>,
    vocabulary_size: usize,
}

fn train(config: &AppConfig, pretty: bool) -> Result<()> {
    let classifier = config.classifier()?;
    let store = classifier.model_store();

    let (model, persisted) = store.retrain().context("Failed to train statistical model")?;
    if !persisted {
        warn!(path = %store.path().display(), "Model trained but not persisted");
    }

    emit(
        &TrainSummary {
            path: store.path(),
            persisted,
            classes: model.classes().iter().map(ToString::to_string).collect(),
            vocabulary_size: model.vectorizer().len(),
        },
        pretty,
    )
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("lexcheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lexcheck=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
