use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use feedback_form::app::{App, AppExit};
use feedback_form::cli::{self, ConsoleSurface, SubmitReport};
use feedback_form::config::Config;
use feedback_form::logging;
use feedback_form::submit::HttpSubmitter;
use feedback_form::ui::install_panic_hook;

#[derive(Parser)]
#[command(name = "feedback-form")]
#[command(about = "Multi-step session feedback form")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Override the endpoint base URL (e.g. http://localhost:5000)
    #[arg(short, long)]
    endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill the form from a JSON answers file and submit it
    Submit {
        /// Flat JSON object of field name to answer
        answers: PathBuf,
    },

    /// Print the review summary for a JSON answers file
    Review {
        answers: PathBuf,
    },

    /// Write the effective configuration to the user config file
    SaveConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.endpoint {
        config.endpoint.base_url = base_url;
    }

    // No subcommand = interactive terminal form
    let is_tui_mode = cli.command.is_none();

    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Submit { answers }) => cmd_submit(&config, &answers).await?,
        Some(Commands::Review { answers }) => cmd_review(&answers)?,
        Some(Commands::SaveConfig) => {
            let path = config.save()?;
            println!("Saved configuration to {}", path.display());
        }
        None => run_tui(config, logging_handle.log_file_path).await?,
    }

    Ok(())
}

async fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    install_panic_hook();

    let submitter = Arc::new(HttpSubmitter::new(&config.endpoint)?);
    tracing::info!(url = %submitter.url(), "Starting feedback form");

    let mut app = App::new(config, submitter);
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    match result? {
        AppExit::Redirect(url) => println!("Feedback submitted. Continue at {}", url),
        AppExit::Quit => {}
    }
    Ok(())
}

async fn cmd_submit(config: &Config, answers_path: &Path) -> Result<()> {
    let answers = cli::load_answers(answers_path)?;
    let submitter = Arc::new(
        HttpSubmitter::new(&config.endpoint).context("Failed to set up the submission client")?,
    );

    let mut surface = ConsoleSurface::new(std::io::stdout());
    let report = cli::submit_answers(config, &answers, submitter, &mut surface).await?;

    match report {
        SubmitReport::Submitted { redirect, .. } => {
            if let Some(url) = redirect {
                println!("Continue at {}", url);
            }
            Ok(())
        }
        SubmitReport::Failed(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}

fn cmd_review(answers_path: &Path) -> Result<()> {
    let answers = cli::load_answers(answers_path)?;
    let summary = cli::review_answers(&answers)?;
    print!("{}", summary);
    Ok(())
}
