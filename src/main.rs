//! codeconv — Snowflake stored procedure → PySpark conversion assistant.
//!
//! Three stages wired in sequence through session state: requirements
//! extraction, PySpark generation, and an optional accuracy self-assessment.
//! All conversion work is done by the hosted model; this binary is prompt
//! orchestration, session state, and rendering.

mod commands;
mod config;
mod llm;
mod session;
mod stages;
mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::Config;
use llm::InferencePool;
use session::SessionStore;
use tui::app::App;

#[derive(Parser)]
#[command(name = "codeconv", version, about = "Convert Snowflake stored procedures to PySpark via hosted LLM inference")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal session (default).
    Tui,
    /// One-shot conversion of a procedure file, no UI.
    Convert {
        /// File containing the Snowflake stored procedure.
        #[arg(long)]
        input: PathBuf,
        /// Also ask the reasoning model for a self-reported accuracy figure.
        #[arg(long)]
        accuracy: bool,
        /// Write the generated PySpark here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so the TUI stays clean; default filter is warn.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Fail fast on a missing credential before any UI is drawn.
    let config = Config::from_env().context("startup configuration")?;

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let pool = Arc::new(InferencePool::from_config(&config));
            tui::runner::run(App::new(pool, config)).await
        }
        Command::Convert {
            input,
            accuracy,
            output,
        } => run_convert(config, input, accuracy, output).await,
    }
}

/// Headless pipeline: stage 1, stage 2, optionally stage 3, in one pass.
async fn run_convert(
    config: Config,
    input: PathBuf,
    accuracy: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let procedure = std::fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;

    let pool = InferencePool::from_config(&config);
    let mut store = SessionStore::new();
    let id = store.create();
    let state = store.state_mut(id);
    state.procedure = procedure;

    commands::read_procedure(state, &pool, &config).await?;
    println!("-- Requirements --\n{}\n", state.requirements);
    eprintln!("requirements tokens: {}", state.requirements_metrics);

    commands::convert_to_pyspark(state, &pool, &config).await?;
    match &output {
        Some(path) => {
            std::fs::write(path, &state.pyspark_code)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("wrote PySpark code to {}", path.display());
        }
        None => println!("-- PySpark --\n{}", state.pyspark_code),
    }
    eprintln!("pyspark tokens: {}", state.pyspark_metrics);

    if accuracy {
        commands::calculate_accuracy(state, &pool, &config).await?;
        println!("\n-- Accuracy --\n{}", state.accuracy_report);
        eprintln!("accuracy tokens: {}", state.accuracy_metrics);
    }

    Ok(())
}
