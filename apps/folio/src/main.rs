mod cli;
mod config;
mod content;
mod errors;
mod handlers;
mod locale;
mod resume;
mod state;
mod theme;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands, ThemeAction};
use crate::config::Config;
use crate::errors::AppError;
use crate::state::AppState;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration first; CLI flags override the environment
    let mut config = Config::from_env()?;
    if let Some(path) = cli.resume.clone() {
        config.resume_path = path;
    }
    if let Some(dir) = cli.content_dir.clone() {
        config.content_dir = dir;
    }

    // Structured logging on stderr; stdout carries the JSON output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting folio v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(config);

    match run(&state, cli.command) {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("{e}");
            eprintln!("{}", serde_json::to_string_pretty(&e.to_json())?);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run(state: &AppState, command: Commands) -> Result<serde_json::Value, AppError> {
    match command {
        Commands::Resume { locale } => handlers::handle_resume(state, locale.as_deref()),
        Commands::Profile { network } => handlers::handle_profile(state, &network),
        Commands::Skills => handlers::handle_skills(state),
        Commands::Dates { start, end, locale } => {
            let end = end.unwrap_or_default();
            handlers::handle_dates(state, &start, &end, locale.as_deref())
        }
        Commands::Theme {
            action: None,
            headless,
        } => handlers::handle_theme(state, headless),
        Commands::Theme {
            action: Some(ThemeAction::Set { mode }),
            ..
        } => handlers::handle_theme_set(state, mode),
        Commands::Locales => handlers::handle_locales(),
        Commands::Content { collection, strict } => {
            handlers::handle_content(state, collection, strict)
        }
    }
}
