use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::content::CollectionKind;
use crate::theme::ColorMode;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Resume views and content checks for the portfolio site")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Resume summary with English dates
    folio resume --locale en

    # Look up a social profile
    folio profile github

    # Format a single period
    folio dates 2023-01-15

    # Persist the dark theme for the next session
    folio theme set dark

    # Validate articles, failing on any invalid page
    folio content articles --strict
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Resume YAML file (overrides FOLIO_RESUME_PATH)
    #[arg(long, global = true)]
    pub resume: Option<PathBuf>,

    /// Content root holding articles/ and projects/ (overrides FOLIO_CONTENT_DIR)
    #[arg(long, global = true)]
    pub content_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Basics, section sizes and formatted work periods
    Resume {
        /// Date locale; anything other than "fr" formats in English
        #[arg(long)]
        locale: Option<String>,
    },
    /// Find a profile by network name (case-insensitive)
    Profile { network: String },
    /// Skills grouped by display category, plus every keyword
    Skills,
    /// Format a date range; an omitted end means "present"
    Dates {
        start: String,
        end: Option<String>,
        #[arg(long)]
        locale: Option<String>,
    },
    /// Show the resolved color mode, or persist a new one
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
        /// Resolve as a non-interactive host: no stored preference, no system signal
        #[arg(long)]
        headless: bool,
    },
    /// List site locales
    Locales,
    /// Load a content collection and report invalid pages
    Content {
        #[arg(value_enum, default_value = "articles")]
        collection: CollectionKind,
        /// Fail on the first invalid page instead of excluding it
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Save the preference used by the next session
    Set {
        #[arg(value_parser = parse_color_mode)]
        mode: ColorMode,
    },
}

fn parse_color_mode(raw: &str) -> Result<ColorMode, String> {
    raw.parse().map_err(|e: crate::errors::AppError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_dates_end_is_optional() {
        let cli = Cli::parse_from(["folio", "dates", "2023-01-15", "--locale", "en"]);
        match cli.command {
            Commands::Dates { start, end, locale } => {
                assert_eq!(start, "2023-01-15");
                assert_eq!(end, None);
                assert_eq!(locale.as_deref(), Some("en"));
            }
            _ => panic!("expected dates command"),
        }
    }

    #[test]
    fn test_theme_set_parses_mode() {
        let cli = Cli::parse_from(["folio", "theme", "set", "dark"]);
        assert!(matches!(
            cli.command,
            Commands::Theme {
                action: Some(ThemeAction::Set {
                    mode: ColorMode::Dark
                }),
                headless: false,
            }
        ));
        assert!(Cli::try_parse_from(["folio", "theme", "set", "blue"]).is_err());
    }

    #[test]
    fn test_content_collection_value() {
        let cli = Cli::parse_from(["folio", "content", "projects", "--strict"]);
        assert!(matches!(
            cli.command,
            Commands::Content {
                collection: CollectionKind::Projects,
                strict: true
            }
        ));
    }
}
