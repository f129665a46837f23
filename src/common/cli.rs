//! CLI argument parsing for pt2dump
//!
//! Options shared by all subcommands live in `CommonArgs` and are
//! flattened into each subcommand, as are output overrides.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "pt2dump")]
#[command(about = "Decode PicoHarp 300 T2 mode files (*.pt2)")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode every record and write the events
    Dump(DumpArgs),

    /// Show the file header
    Info(InfoArgs),

    /// Decode the records and show run statistics only
    Stats(InfoArgs),
}

/// Arguments shared by all subcommands
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to configuration file
    #[arg(short = 'f', long = "config", env = "PT2_CONFIG")]
    pub config_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct DumpArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Binary PicoHarp 300 T2 mode file
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Do not write the file header
    #[arg(long)]
    pub no_header: bool,

    /// Do not write run statistics
    #[arg(long)]
    pub no_stats: bool,
}

impl DumpArgs {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.no_header {
            config.output.header = false;
        }
        if self.no_stats {
            config.output.statistics = false;
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Binary PicoHarp 300 T2 mode file
    pub input: PathBuf,

    /// Override output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}
