//! Mutation-switching instrumentation for JavaScript and TypeScript.
//!
//! Every mutant of a file is compiled into the same program, guarded by a
//! check against a global "active mutant" id, so a test runner can switch
//! between mutants without rebuilding. See [`instrumenter::instrument`] for
//! the batch entry point and [`disable_type_checks::disable_type_checks`]
//! for the companion pass that silences the TypeScript checker.

pub mod collector;
pub mod disable_type_checks;
pub mod error;
pub mod instrumenter;
pub mod mutant;
pub mod mutators;
pub mod options;
pub mod parsers;
pub mod patch;
pub mod placers;
pub mod printers;
pub mod report;
pub mod source;
pub mod span;
pub mod syntax;
pub mod syntax_helpers;
pub mod transformer;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::InstrumentError;
pub use instrumenter::{InstrumentResult, instrument};
pub use options::InstrumenterOptions;
pub use source::File;
