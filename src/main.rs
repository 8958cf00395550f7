//! Lectura CLI
//!
//! `prepare` turns raw line records into decorated review tasks for the
//! external review surface; `finalize` sanitizes finished reviews and
//! writes the store file.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lectura::config::Config;
use lectura::ingest::{apply_policy, IngestError, MalformedPolicy, TaskReader};
use lectura::markup::uncertain_spans;
use lectura::render::SurfaceConfig;
use lectura::sanitize::Corrections;
use lectura::store::{commit_batch_with, MemoryStore};
use lectura::task::{decorate_stream, TaskView};

#[derive(Parser)]
#[command(name = "lectura", version, about = "Review pipeline for OCR line transcriptions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decorate raw task records for the review surface
    Prepare {
        /// Raw tasks, newline-delimited JSON ("-" for stdin)
        tasks: PathBuf,
        /// Decorated output path ("-" for stdout)
        #[arg(short, long, default_value = "-")]
        out: PathBuf,
        /// Also write the review-surface configuration JSON here
        #[arg(long)]
        surface_config: Option<PathBuf>,
        /// Abort on the first malformed record instead of skipping it
        #[arg(long)]
        strict: bool,
    },
    /// Sanitize reviewed tasks and write the store file
    Finalize {
        /// Reviewed tasks, newline-delimited JSON ("-" for stdin)
        reviewed: PathBuf,
        /// Store output path ("-" for stdout)
        #[arg(short, long, default_value = "-")]
        out: PathBuf,
        /// Replace round 's' with the long s 'ſ' in every transcription
        #[arg(long)]
        fix_long_s: bool,
        /// Replace modern umlauts with their historical forms
        #[arg(long)]
        fix_umlauts: bool,
    },
}

fn open_input(path: &Path) -> anyhow::Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

fn open_output(path: &Path) -> anyhow::Result<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        Ok(Box::new(BufWriter::new(io::stdout())))
    } else {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

fn prepare(
    tasks: &Path,
    out: &Path,
    surface_config: Option<&Path>,
    strict: bool,
) -> anyhow::Result<()> {
    let config = Config::from_env();

    if let Some(path) = surface_config {
        let surface = SurfaceConfig::from_config(&config);
        let mut writer = open_output(path)?;
        serde_json::to_writer_pretty(&mut writer, &surface)?;
        writer.flush()?;
        tracing::info!(
            sessions = surface.allowed_sessions.len(),
            keyboard = surface.keyboard.len(),
            "Wrote surface configuration to {}",
            path.display()
        );
    }

    let policy = if strict { MalformedPolicy::Abort } else { MalformedPolicy::Skip };
    let reader = TaskReader::new(open_input(tasks)?);
    let mut writer = open_output(out)?;

    let mut count = 0usize;
    for view in apply_policy(decorate_stream(reader), policy) {
        let view = view?;
        serde_json::to_writer(&mut writer, &view)?;
        writer.write_all(b"\n")?;
        count += 1;
    }
    writer.flush()?;
    tracing::info!(tasks = count, "Prepared review tasks");
    Ok(())
}

fn finalize(reviewed: &Path, out: &Path, corrections: Corrections) -> anyhow::Result<()> {
    let reader = open_input(reviewed)?;
    let mut batch: Vec<TaskView> = Vec::new();
    for (num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let view: TaskView = serde_json::from_str(&line)
            .map_err(|source| IngestError::MalformedTask { line: num + 1, source })?;
        batch.push(view);
    }

    let total = batch.len();
    let uncertain: usize = batch
        .iter()
        .map(|t| uncertain_spans(&t.transcription).count())
        .sum();

    let mut store = MemoryStore::new();
    let committed = commit_batch_with(batch, corrections, &mut store)?;

    let mut writer = open_output(out)?;
    store.write_jsonl(&mut writer)?;
    writer.flush()?;
    tracing::info!(
        reviewed = total,
        committed,
        stored = store.len(),
        uncertain_spans = uncertain,
        "Finalized review batch"
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lectura=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Prepare { tasks, out, surface_config, strict } => {
            prepare(&tasks, &out, surface_config.as_deref(), strict)
        }
        Command::Finalize { reviewed, out, fix_long_s, fix_umlauts } => {
            let corrections = Corrections { long_s: fix_long_s, umlauts: fix_umlauts };
            finalize(&reviewed, &out, corrections)
        }
    }
}
