#![forbid(unsafe_code)]

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use hearth_state::{
    load_with_report, ByteStorage, FileStorage, LoadSource, SchemaVersion, StateStore,
};
use tracing_subscriber::EnvFilter;

mod report;

use crate::report::{loaded_from, InspectReport, MigrateReport};

#[derive(Parser, Debug)]
#[command(
    name = "hearth-state",
    version,
    about = "Inspect, migrate or reset a persisted hearth state file."
)]
struct Args {
    /// Persisted state file.
    ///
    /// Environment variable: `HEARTH_STATE_FILE`.
    #[arg(long, env = "HEARTH_STATE_FILE", value_name = "PATH")]
    state_file: PathBuf,

    /// Log filter (tracing-subscriber EnvFilter syntax). Falls back to `RUST_LOG`, then `warn`.
    ///
    /// Environment variable: `HEARTH_LOG`.
    #[arg(long, env = "HEARTH_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the file's schema version and a summary of its contents as JSON.
    Inspect,
    /// Rewrite the file in the current schema.
    Migrate {
        /// Report what would happen without writing.
        #[arg(long, action = clap::ArgAction::SetTrue)]
        dry_run: bool,
    },
    /// Replace the file with an empty default state.
    Reset {
        /// Discard a readable state as well (unreadable files are always replaced).
        #[arg(long, action = clap::ArgAction::SetTrue)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());
    run(args)
}

fn init_tracing(log_level: Option<&str>) {
    let filter = log_level
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    // Logs go to stderr; stdout carries the JSON reports.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let storage = FileStorage::new(args.state_file);
    match args.command {
        Command::Inspect => inspect(storage),
        Command::Migrate { dry_run } => migrate(storage, dry_run),
        Command::Reset { force } => reset(storage, force),
    }
}

fn read_state_file(storage: &mut FileStorage) -> anyhow::Result<Vec<u8>> {
    storage
        .read()
        .with_context(|| format!("read {}", storage.path().display()))
}

fn inspect(mut storage: FileStorage) -> anyhow::Result<()> {
    let bytes = read_state_file(&mut storage)?;
    let report = load_with_report(&bytes);
    print_json(&InspectReport::new(storage.path(), &bytes, &report))
}

fn migrate(mut storage: FileStorage, dry_run: bool) -> anyhow::Result<()> {
    let path = storage.path().to_path_buf();
    let report = if dry_run {
        load_with_report(&read_state_file(&mut storage)?)
    } else {
        StateStore::new(storage)
            .migrate()
            .with_context(|| format!("migrate {}", path.display()))?
    };

    if let LoadSource::Defaulted(err) = &report.source {
        bail!(
            "{} is unreadable ({err}); use `reset` to replace it",
            path.display()
        );
    }

    let from = loaded_from(&report.source);
    tracing::info!(path = %path.display(), ?from, dry_run, "migrate");
    print_json(&MigrateReport {
        path: path.display().to_string(),
        from: from.map(|version| version.to_string()),
        to: SchemaVersion::CURRENT.to_string(),
        rewritten: from.is_some() && !dry_run,
    })
}

fn reset(storage: FileStorage, force: bool) -> anyhow::Result<()> {
    let path = storage.path().to_path_buf();
    let store = StateStore::new(storage);
    let current = store
        .load_report()
        .with_context(|| format!("read {}", path.display()))?;
    if matches!(current.source, LoadSource::Upgraded { .. }) && !force {
        bail!(
            "{} holds a readable state with {} profile(s); pass --force to discard it",
            path.display(),
            current.state.profile_data.len()
        );
    }

    store
        .reset()
        .with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), "reset persisted state");
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{json}");
    Ok(())
}
