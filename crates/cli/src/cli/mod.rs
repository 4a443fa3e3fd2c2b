pub mod chat;
pub mod config;
pub mod doctor;
pub mod input;
pub mod survey;
pub mod vault;

use clap::{Parser, Subcommand};

/// Strategos: AI strategic readiness assessment.
#[derive(Debug, Parser)]
#[command(name = "strategos", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the local vault password and accept the legal terms.
    Register,
    /// Answer the questionnaire interactively.
    Survey {
        /// Only walk one section (e.g. "data").
        #[arg(long)]
        section: Option<String>,
    },
    /// Set a single answer without the interactive walk.
    Answer {
        /// Question id (see `strategos review`).
        question_id: String,
        /// Answer text. An empty string clears the answer.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Print every question with its current answer.
    Review,
    /// Write a progress backup file.
    Export {
        /// Output path (defaults to strategos-progress-<date>.json).
        #[arg(long, short)]
        output: Option<String>,
    },
    /// Replace all answers with the contents of a backup file.
    Import {
        /// Path to a progress backup file.
        path: String,
    },
    /// Generate the strategic report, then chat about it.
    Report {
        /// Print the report as JSON instead of formatted text.
        #[arg(long)]
        json: bool,
        /// Skip the follow-up chat.
        #[arg(long)]
        no_chat: bool,
    },
    /// Delete the vault password and all saved progress.
    Reset {
        /// Do not ask for confirmation.
        #[arg(long)]
        yes: bool,
    },
    /// Run diagnostic checks against the current configuration.
    Doctor,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
    /// Store the API key in the OS keychain.
    SetSecret,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path in `STRATEGOS_CONFIG` (or
/// `strategos.toml` by default). Returns the parsed [`Config`] and the
/// path that was used.
///
/// [`Config`]: sg_domain::config::Config
pub fn load_config() -> anyhow::Result<(sg_domain::config::Config, String)> {
    let config_path =
        std::env::var("STRATEGOS_CONFIG").unwrap_or_else(|_| "strategos.toml".into());
    let config = load_config_from(&config_path)?;
    Ok((config, config_path))
}

/// Parse `path`, falling back to defaults when it does not exist.
pub fn load_config_from(path: &str) -> anyhow::Result<sg_domain::config::Config> {
    if !std::path::Path::new(path).exists() {
        return Ok(sg_domain::config::Config::default());
    }
    let raw = std::fs::read_to_string(path).map_err(|e| anyhow::anyhow!("reading {path}: {e}"))?;
    toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {path}: {e}"))
}
