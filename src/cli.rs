use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::settings::{AppConfig, TableLayoutKind};

#[derive(Parser, Debug)]
#[command(author, version, about = "two-leg qualification dashboard")]
pub struct Cli {
    #[command(flatten)]
    pub data: DataArgs,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

/// Input file overrides shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Path to qualification_stats.csv
    #[arg(long, global = true)]
    pub stats: Option<PathBuf>,

    /// Path to qualification_by_gd.csv
    #[arg(long = "by-gd", global = true)]
    pub by_gd: Option<PathBuf>,
}

impl DataArgs {
    pub fn to_config(&self) -> AppConfig {
        let mut config = AppConfig::new();
        if let Some(path) = &self.stats {
            config.data.stats_path = path.clone();
        }
        if let Some(path) = &self.by_gd {
            config.data.by_gd_path = path.clone();
        }
        config
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the dashboard server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Render the dashboard page once and write it to a static HTML file
    Render {
        /// Team to filter by (defaults to All)
        #[arg(short, long)]
        team: Option<String>,
        /// Table layout: combined or split
        #[arg(short, long, value_enum)]
        layout: Option<TableLayoutKind>,
        /// Output HTML file
        #[arg(short, long, default_value = "dashboard.html")]
        output: PathBuf,
    },
    /// Check that both input files load and honour the percentage conventions
    Validate {
        /// Allowed deviation from 100 when summing percentages
        #[arg(long, default_value_t = 0.2)]
        tolerance: f64,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
