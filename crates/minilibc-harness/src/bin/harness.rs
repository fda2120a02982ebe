//! CLI entrypoint for the minilibc conformance harness.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use minilibc_harness::structured_log::{ArtifactIndex, LogEmitter, validate_log_file};
use minilibc_harness::{
    CodeRange, ConformanceReport, HarnessConfig, Suite, UnitOutcome, parse_units,
};
use minilibc_loader::Unit;

const SUITE_ID: &str = "minilibc-conformance";

/// Conformance tooling for minilibc ctype and errno candidates.
#[derive(Debug, Parser)]
#[command(name = "minilibc-harness")]
#[command(about = "Build, load and check C ctype/errno candidates against the minilibc oracle")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build and check candidates.
    Run {
        /// Candidate source tree (`ctype/<unit>.c`, `errno/errno.c`).
        #[arg(long)]
        source_root: Option<PathBuf>,
        /// C compiler.
        #[arg(long)]
        cc: Option<String>,
        /// Extra compiler flag; repeatable.
        #[arg(long = "cflag", allow_hyphen_values = true)]
        cflags: Vec<String>,
        /// Prebuilt shared object exporting every unit; skips compilation.
        #[arg(long)]
        library: Option<PathBuf>,
        /// Code range as START..END; must cover -10..300.
        #[arg(long, allow_hyphen_values = true)]
        range: Option<String>,
        /// Unit to run (e.g. `isdigit`, `errno`); repeatable, default all.
        #[arg(long = "unit")]
        units: Vec<String>,
        /// Output report path (markdown).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Output report path (JSON).
        #[arg(long)]
        json: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Artifact index path (JSON) listing written outputs with SHA-256.
        #[arg(long)]
        artifact_index: Option<PathBuf>,
    },
    /// List units and the symbols they must export.
    List,
    /// Validate a structured JSONL log.
    ValidateLog {
        #[arg(long)]
        log: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            source_root,
            cc,
            cflags,
            library,
            range,
            units,
            report,
            json,
            log,
            artifact_index,
        } => {
            let mut config = HarnessConfig::from_env()?;
            if let Some(root) = source_root {
                config.source_root = root;
            }
            if let Some(cc) = cc {
                config.compiler = cc;
            }
            if !cflags.is_empty() {
                config.cflags = cflags;
            }
            if library.is_some() {
                config.library = library;
            }
            if let Some(range) = range {
                config.range = range.parse::<CodeRange>()?;
            }
            let units = parse_units(units.as_slice())?;

            let provider = config.provider()?;
            eprintln!(
                "Checking {} unit(s) from {} over {}",
                units.len(),
                provider.describe(),
                config.range
            );

            let run_id = format!("run-{}", std::process::id());
            let mut emitter = match &log {
                Some(path) => {
                    create_parent(path)?;
                    LogEmitter::to_file(path, SUITE_ID, &run_id)?
                }
                None => LogEmitter::discard(SUITE_ID, &run_id),
            };

            let suite_report = Suite::new(provider.as_ref(), config.range)
                .with_units(units)
                .run(&mut emitter)?;
            drop(emitter);

            for unit in &suite_report.units {
                match unit.outcome {
                    UnitOutcome::Pass => eprintln!("[PASS] {}", unit.unit),
                    _ => {
                        eprintln!("[{:?}] {}", unit.outcome, unit.unit);
                        if let Some(error) = &unit.error {
                            eprintln!("    {error}");
                        }
                        for check in unit.checks.iter().filter(|c| !c.passed) {
                            if let Some(first) = check.failure_messages().next() {
                                eprintln!("    {first}");
                            }
                        }
                    }
                }
            }

            let report_doc =
                ConformanceReport::from_suite("minilibc Conformance Report", suite_report);
            eprintln!(
                "Conformance complete: total={}, passed={}, failed={}, build_errors={}, load_errors={}",
                report_doc.summary.total,
                report_doc.summary.passed,
                report_doc.summary.failed,
                report_doc.summary.build_errors,
                report_doc.summary.load_errors
            );

            let mut index = ArtifactIndex::new(&run_id, SUITE_ID);
            if let Some(path) = &report {
                write_output(path, &report_doc.to_markdown())?;
                index.add_file(path, "report_markdown")?;
            }
            if let Some(path) = &json {
                write_output(path, &report_doc.to_json())?;
                index.add_file(path, "report_json")?;
            }
            if let Some(path) = &log {
                index.add_file(path, "log")?;
            }
            if let Some(path) = &artifact_index {
                write_output(path, &index.to_json()?)?;
            }

            if !report_doc.summary.all_passed() {
                return Err("Conformance verification failed".into());
            }
        }
        Command::List => {
            for unit in Unit::all() {
                println!(
                    "{:<10} {:<18} {}",
                    unit.name(),
                    unit.symbol(),
                    unit.source_path().display()
                );
            }
        }
        Command::ValidateLog { log } => {
            let (lines, errors) = validate_log_file(&log)?;
            for error in &errors {
                eprintln!("{error}");
            }
            if !errors.is_empty() {
                return Err(format!(
                    "{} validation error(s) in {} line(s) of {}",
                    errors.len(),
                    lines,
                    log.display()
                )
                .into());
            }
            eprintln!("{}: {lines} valid line(s)", log.display());
        }
    }

    Ok(())
}

fn create_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn write_output(path: &Path, body: &str) -> std::io::Result<()> {
    create_parent(path)?;
    std::fs::write(path, body)?;
    eprintln!("Wrote {}", path.display());
    Ok(())
}
