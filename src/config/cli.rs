use crate::config::toml_config::WhitelistConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "callerid-whitelist")]
#[command(about = "Create voip.ms Caller-ID whitelist filters from a phone book export")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "whitelist.toml")]
    pub config: PathBuf,

    /// Phone book CSV to read instead of the configured one
    #[arg(long)]
    pub phone_book: Option<PathBuf>,

    /// Do not write a run log file
    #[arg(long)]
    pub no_log: bool,

    /// Show the filters that would be created without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    pub fn apply_overrides(&self, config: &mut WhitelistConfig) {
        if let Some(phone_book) = &self.phone_book {
            tracing::info!("🔧 Phone book overridden to: {}", phone_book.display());
            config.phone_book = phone_book.clone();
        }
        if self.no_log {
            config.log.enabled = false;
        }
    }
}
