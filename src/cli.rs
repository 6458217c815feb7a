use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::ShowId;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Show snapshot file (overrides store.snapshot)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub snapshot: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, value_name = "LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Timeout for follow service requests (in milliseconds)
    #[arg(long, value_name = "MS", global = true)]
    pub timeout: Option<u64>,

    /// Reference date for relative labels, defaults to the local date
    #[arg(long, value_name = "YYYY-MM-DD", global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List followed shows
    Following,
    /// List upcoming episodes with time from now
    Upcoming,
    /// Stop following one or more shows
    Unfollow {
        #[arg(value_name = "SHOW_ID", required = true)]
        show_ids: Vec<ShowId>,
    },
}

impl CliArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log level '{}'. Valid levels are: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        if self.timeout == Some(0) {
            return Err("timeout must be greater than 0".to_string());
        }

        Ok(())
    }

    pub fn tracing_level(&self) -> tracing::Level {
        match self.log_level.as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        }
    }
}
