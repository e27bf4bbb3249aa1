use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use js_mutant::disable_type_checks::disable_type_checks;
use js_mutant::mutant::ApiMutant;
use js_mutant::mutators::Mutator;
use js_mutant::options::{InstrumenterOptions, MutationRange};
use js_mutant::report::summarize;
use js_mutant::{File, InstrumentError, instrument};

use crate::out::{write_files, write_mutants_json};
use crate::ui::Ui;

const EXIT_OK: i32 = 0;
const EXIT_ERROR: i32 = 1;

/// Top-level CLI arguments for the `js-mutant` binary.
#[derive(Debug, Parser)]
#[command(
    name = "js-mutant",
    version,
    about = "Mutation-switching instrumenter for JavaScript and TypeScript"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands supported by `js-mutant`.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Instrument files with every mutant behind a runtime switch.
    Instrument {
        /// Source files to instrument (.js, .ts, .tsx, .html, .vue, .svelte, ...).
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory receiving the instrumented files and `mutants.json`.
        #[arg(long)]
        out_dir: PathBuf,

        /// Mutator to exclude; its mutants are reported as ignored.
        #[arg(long = "exclude-mutation", value_name = "NAME")]
        excluded_mutations: Vec<String>,

        /// Only mutate inside this byte range of a file.
        #[arg(long = "mutation-range", value_name = "FILE:START-END", value_parser = MutationRange::parse)]
        mutation_ranges: Vec<MutationRange>,

        /// JSON options file (`excludedMutations`, `mutationRanges`).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit a machine-readable JSON report to stdout.
        #[arg(long)]
        json: bool,

        /// List every mutant and log placement details.
        #[arg(long, short = 'v')]
        verbose: bool,
    },

    /// Remove `@ts-*` directives and add `// @ts-nocheck` to every file.
    DisableTypeChecks {
        /// Files to process.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory receiving the processed files.
        #[arg(long)]
        out_dir: PathBuf,
    },

    /// List the available mutators.
    Mutators,
}

/// JSON report of an `instrument` run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InstrumentReport {
    tool: &'static str,
    version: &'static str,
    files: Vec<String>,
    mutants: Vec<ApiMutant>,
    failures: Vec<FailureEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct FailureEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    message: String,
}

impl From<&InstrumentError> for FailureEntry {
    fn from(e: &InstrumentError) -> Self {
        Self {
            file: e.file().map(str::to_string),
            message: e.to_string(),
        }
    }
}

impl InstrumentReport {
    fn new() -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            files: Vec::new(),
            mutants: Vec::new(),
            failures: Vec::new(),
            error: None,
        }
    }

    fn failure(error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::new()
        }
    }
}

fn print_json_and_exit(report: InstrumentReport, exit_code: i32) -> ! {
    let json = serde_json::to_string_pretty(&report).expect("serialize report to json");
    println!("{json}");
    std::process::exit(exit_code);
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

/// Parse CLI arguments and dispatch the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Instrument {
            files,
            out_dir,
            excluded_mutations,
            mutation_ranges,
            config,
            json,
            verbose,
        } => {
            init_tracing(verbose);
            let mut ui = Ui::new(json);

            let options = match load_options(config.as_deref(), excluded_mutations, mutation_ranges) {
                Ok(options) => options,
                Err(e) => {
                    if json {
                        print_json_and_exit(InstrumentReport::failure(format!("{e:#}")), EXIT_ERROR);
                    }
                    return Err(e);
                }
            };

            ui.title("js-mutant: instrument");
            ui.line(format!("files: {}", files.len()));

            let sources = read_files(&files)?;
            let result = match instrument(&sources, &options) {
                Ok(result) => result,
                Err(e) => {
                    if json {
                        print_json_and_exit(InstrumentReport::failure(e.to_string()), EXIT_ERROR);
                    }
                    ui.error(&e);
                    return Err(e.into());
                }
            };

            write_files(&out_dir, &result.files)?;
            write_mutants_json(&out_dir, &result.mutants)?;

            for failure in &result.failures {
                ui.file_error(format!("failed to instrument: {failure}"));
            }
            let exit_code = if result.failures.is_empty() {
                EXIT_OK
            } else {
                EXIT_ERROR
            };

            if json {
                let report = InstrumentReport {
                    files: result.files.iter().map(|f| f.name.clone()).collect(),
                    failures: result.failures.iter().map(FailureEntry::from).collect(),
                    mutants: result.mutants,
                    ..InstrumentReport::new()
                };
                print_json_and_exit(report, exit_code);
            }

            print_summary(&ui, &result.files, &result.mutants, result.failures.len());

            if verbose {
                ui.title("--- mutants ---");
                for m in &result.mutants {
                    ui.mutant(m);
                }
            }

            ui.line(format!("output: {}", out_dir.display()));

            if exit_code != EXIT_OK {
                ui.error(format!("{} file(s) could not be instrumented", ui.file_errors()));
                std::process::exit(exit_code);
            }

            Ok(())
        }

        Command::DisableTypeChecks { files, out_dir } => {
            init_tracing(false);
            let mut ui = Ui::new(false);

            let sources = read_files(&files)?;
            let mut processed = Vec::with_capacity(sources.len());
            for file in &sources {
                match disable_type_checks(file) {
                    Ok(out) => processed.push(out),
                    Err(e) => ui.file_error(format!("failed to disable type checks: {e}")),
                }
            }

            write_files(&out_dir, &processed)?;
            ui.line(format!(
                "disabled type checks in {} file(s), output: {}",
                processed.len(),
                out_dir.display()
            ));

            if ui.file_errors() > 0 {
                std::process::exit(EXIT_ERROR);
            }

            Ok(())
        }

        Command::Mutators => {
            let ui = Ui::new(false);
            let width = Mutator::ALL.iter().map(|m| m.name().len()).max().unwrap_or(0);
            for m in Mutator::ALL {
                ui.line(format!("{:<width$}  {}", m.name(), m.description()));
            }
            Ok(())
        }
    }
}

/// Config file first, then CLI flags on top.
fn load_options(
    config: Option<&Path>,
    excluded_mutations: Vec<String>,
    mutation_ranges: Vec<MutationRange>,
) -> Result<InstrumenterOptions> {
    let mut options = match config {
        Some(path) => InstrumenterOptions::load(path)?,
        None => InstrumenterOptions::default(),
    };

    options.excluded_mutations.extend(excluded_mutations);
    options.mutation_ranges.extend(mutation_ranges);
    options.validate()?;

    Ok(options)
}

fn read_files(paths: &[PathBuf]) -> Result<Vec<File>> {
    paths
        .iter()
        .map(|path| File::read(path).with_context(|| format!("failed to load input {:?}", path)))
        .collect()
}

fn print_summary(ui: &Ui, files: &[File], mutants: &[ApiMutant], failed: usize) {
    let counts = summarize(mutants);
    let total: usize = counts.iter().map(|c| c.total).sum();
    let ignored: usize = counts.iter().map(|c| c.ignored).sum();

    ui.title("--- instrument summary ---");
    ui.line(format!("files instrumented: {}", files.len()));
    ui.line(format!("files failed:       {failed}"));
    ui.line(format!("mutants total:      {total}"));
    ui.line(format!("mutants placed:     {}", total - ignored));
    ui.line(format!("mutants ignored:    {ignored}"));

    if counts.is_empty() {
        return;
    }

    ui.title("--- mutants per mutator ---");
    for c in &counts {
        ui.line(format!(
            "{}: {} ({} ignored)",
            c.mutator_name, c.total, c.ignored
        ));
    }
}
