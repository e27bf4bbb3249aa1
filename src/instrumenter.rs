//! Batch instrumentation: parse, transform and print a set of files.

use crate::collector::MutantCollector;
use crate::error::InstrumentError;
use crate::mutant::ApiMutant;
use crate::options::{FileOptions, InstrumenterOptions};
use crate::parsers::parse;
use crate::printers::print;
use crate::source::File;
use crate::span::LineIndex;
use crate::transformer::transform_script;

/// Outcome of instrumenting a batch of files.
#[derive(Debug)]
pub struct InstrumentResult {
    /// Instrumented files, in input order. Failed files are left out.
    pub files: Vec<File>,

    /// Every mutant of the emitted files, ignored ones included.
    pub mutants: Vec<ApiMutant>,

    /// One error per failed file.
    pub failures: Vec<InstrumentError>,
}

/// Instrument every file with one shared collector.
///
/// A file that fails is skipped and its mutants are forgotten, so ids stay
/// dense across the emitted files. Only invalid options fail the batch.
pub fn instrument(
    files: &[File],
    options: &InstrumenterOptions,
) -> Result<InstrumentResult, InstrumentError> {
    options.validate()?;

    let mut collector = MutantCollector::new();
    let mut instrumented = Vec::with_capacity(files.len());
    let mut failures = Vec::new();

    for file in files {
        let checkpoint = collector.checkpoint();

        match instrument_file(file, &options.for_file(&file.name), &mut collector) {
            Ok(out) => {
                let created = collector.mutants().len() - checkpoint;
                tracing::info!(file = %file.name, mutants = created, "instrumented");
                if created > 0 && !collector.has_placed_mutants(&file.name) {
                    tracing::info!(file = %file.name, "all mutants ignored, file left untouched");
                }
                instrumented.push(out);
            }
            Err(e) => {
                collector.rollback(checkpoint);
                tracing::warn!(file = %file.name, error = %e, "skipping file");
                failures.push(e);
            }
        }
    }

    Ok(InstrumentResult {
        files: instrumented,
        mutants: collector.api_mutants(),
        failures,
    })
}

/// Instrument a single file, registering its mutants with `collector`.
pub fn instrument_file(
    file: &File,
    options: &FileOptions,
    collector: &mut MutantCollector,
) -> Result<File, InstrumentError> {
    let mut ast = parse(file)?;
    let lines = LineIndex::new(&file.content);

    for script in ast.scripts_mut() {
        transform_script(script, &file.name, &lines, collector, options)?;
    }

    Ok(File::new(file.name.clone(), print(&ast)?))
}
