// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! mapstudio CLI
//!
//! Inspects, checks, round-trips and converts map record sets.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use mapstudio_codec::RecordSet;
use mapstudio_config::{ConfigService, ConfigStore, FsConfigStore, TRANSCODE_KEY};
use mapstudio_core::{export_scope, import_scope, DescriptorRegistry, PoseSpace, TranscodeConfig};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod files;
mod report;

#[derive(Parser, Debug)]
#[command(author, version, about = "Map record-set tooling")]
struct Args {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Transcode config file (JSON); defaults to the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// List registered entry kinds and their reference fields
    Kinds,
    /// Import a record set and report every diagnostic
    Check {
        /// Record set (.json or CBOR)
        file: PathBuf,
    },
    /// Import then export a record set and compare the result
    Roundtrip {
        /// Record set (.json or CBOR)
        file: PathBuf,
        /// Export world poses instead of local ones
        #[arg(long)]
        world: bool,
        /// Write the exported record set here
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Convert a record set between JSON and CBOR
    Convert {
        /// Source record set
        input: PathBuf,
        /// Destination; `.json` writes JSON, anything else CBOR
        output: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?,
        )
        .init();

    let registry = DescriptorRegistry::standard().context("building the descriptor registry")?;
    match args.cmd {
        Command::Kinds => {
            writeln!(io::stdout().lock(), "{}", report::kinds(&registry))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { file } => {
            let config = load_config(args.config.as_deref())?;
            check(&registry, &config, &file)
        }
        Command::Roundtrip { file, world, out } => {
            let mut config = load_config(args.config.as_deref())?;
            if world {
                config.pose_space = PoseSpace::World;
            }
            roundtrip(&registry, &config, &file, out.as_deref())
        }
        Command::Convert { input, output } => {
            let set = files::load(&input)?;
            files::save(&output, &set)?;
            info!(
                records = set.records.len(),
                "converted {} -> {}",
                input.display(),
                output.display()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// `--config` file, else the user store, else defaults.
fn load_config(explicit: Option<&Path>) -> Result<TranscodeConfig> {
    if let Some(path) = explicit {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        return serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing transcode config {}", path.display()));
    }
    match FsConfigStore::new() {
        Ok(store) => stored_config(&ConfigService::new(store)),
        Err(err) => {
            debug!(error = %err, "no user config directory; using defaults");
            Ok(TranscodeConfig::default())
        }
    }
}

fn stored_config<S: ConfigStore>(service: &ConfigService<S>) -> Result<TranscodeConfig> {
    let loaded = service
        .load::<TranscodeConfig>(TRANSCODE_KEY)
        .context("loading the stored transcode config")?;
    Ok(loaded.unwrap_or_default())
}

fn check(registry: &DescriptorRegistry, config: &TranscodeConfig, file: &Path) -> Result<ExitCode> {
    let set = files::load(file)?;
    let (scope, outcome) = import_scope(registry, config, &set.scope, &set.records);

    let mut out = io::stdout().lock();
    writeln!(out, "{}", report::import_summary(&scope, &outcome.stats))?;
    if !outcome.diagnostics.is_empty() {
        writeln!(out, "{}", report::diagnostics(&outcome.diagnostics))?;
    }
    if outcome.has_errors() {
        warn!(scope = %set.scope, "import reported errors");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn roundtrip(
    registry: &DescriptorRegistry,
    config: &TranscodeConfig,
    file: &Path,
    dest: Option<&Path>,
) -> Result<ExitCode> {
    let set = files::load(file)?;
    let (scope, outcome) = import_scope(registry, config, &set.scope, &set.records);
    let mut out = io::stdout().lock();
    if !outcome.diagnostics.is_empty() {
        writeln!(out, "{}", report::diagnostics(&outcome.diagnostics))?;
    }

    let records = match export_scope(registry, config, &scope) {
        Ok(records) => records,
        Err(fatal) => {
            writeln!(out, "export of `{}` failed:", fatal.scope)?;
            writeln!(out, "{}", report::failures(&fatal.failures))?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let changed = report::differences(&set.records, &records);
    if changed.is_empty() {
        writeln!(out, "{} records round-tripped unchanged", records.len())?;
    } else {
        for line in &changed {
            writeln!(out, "{line}")?;
        }
    }
    if let Some(dest) = dest {
        files::save(
            dest,
            &RecordSet {
                scope: set.scope,
                records,
            },
        )?;
    }
    Ok(if changed.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
