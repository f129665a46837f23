//! pt2dump - Decode PicoHarp 300 T2 mode files
//!
//! Usage:
//!   pt2dump dump <file> [-o <out>] [--format text|json]  - Write every event
//!   pt2dump info <file>                                  - Show the file header
//!   pt2dump stats <file>                                 - Show run statistics
//!
//! Exit status: 0 on success, 2 when the file fails the header checks (no
//! records were read), 1 on any other error.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use pt2_rs::common::cli::{Cli, Commands, CommonArgs, DumpArgs, InfoArgs};
use pt2_rs::config::{Config, OutputFormat};
use pt2_rs::output::writer_for;
use pt2_rs::{Pt2Error, Pt2Reader, RunStatus};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dump(args) => dump(&args),
        Commands::Info(args) => show_info(&args),
        Commands::Stats(args) => show_stats(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code(&e));
    }
}

/// Exit status for a failed command
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<Pt2Error>() {
        Some(e) if e.is_precondition() => 2,
        _ => 1,
    }
}

fn init_tracing() -> anyhow::Result<()> {
    // stdout carries the decoded data
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pt2_rs=info".parse()?))
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn load_config(common: &CommonArgs) -> anyhow::Result<Config> {
    let config = Config::load_or_default(common.config_file.as_deref())
        .map_err(Pt2Error::from)
        .context("Failed to load configuration")?;
    if let Some(path) = &common.config_file {
        info!(path = %path.display(), "Loaded configuration");
    }
    Ok(config)
}

fn open_reader(path: &Path, config: &Config) -> anyhow::Result<Pt2Reader<io::BufReader<File>>> {
    let mut reader =
        Pt2Reader::open(path).with_context(|| format!("Failed to read {}", path.display()))?;
    reader.set_warn_invalid_channels(config.processing.warn_invalid_channels);
    Ok(reader)
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => {
            let file =
                File::create(p).with_context(|| format!("Failed to create {}", p.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn dump(args: &DumpArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.common)?;
    args.apply_to(&mut config);

    let reader = open_reader(&args.input, &config)?;
    let out = open_output(args.output.as_deref())?;
    let mut writer = writer_for(config.output.format, out);

    if config.output.header {
        writer.write_header(reader.header())?;
    }

    let summary = reader.process(|record| writer.write_event(record))?;

    if config.output.statistics {
        writer.write_summary(&summary)?;
    }
    writer.flush()?;

    if summary.status == RunStatus::Truncated {
        eprintln!(
            "Warning: input ended after {} of {} records",
            summary.records_read, summary.record_count
        );
    }
    Ok(())
}

fn output_format(args: &InfoArgs, config: &Config) -> OutputFormat {
    args.format.unwrap_or(config.output.format)
}

fn show_info(args: &InfoArgs) -> anyhow::Result<()> {
    let config = load_config(&args.common)?;
    let reader = open_reader(&args.input, &config)?;

    let mut writer = writer_for(output_format(args, &config), io::stdout().lock());
    writer.write_header(reader.header())?;
    writer.flush()?;
    Ok(())
}

fn show_stats(args: &InfoArgs) -> anyhow::Result<()> {
    let config = load_config(&args.common)?;
    let reader = open_reader(&args.input, &config)?;

    let summary = reader.process(|_| Ok(()))?;

    let mut writer = writer_for(output_format(args, &config), io::stdout().lock());
    writer.write_summary(&summary)?;
    writer.flush()?;
    Ok(())
}
