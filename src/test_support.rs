//! Shortcuts shared by unit tests.

use std::collections::BTreeSet;

use crate::collector::MutantCollector;
use crate::instrumenter::instrument_file;
use crate::mutant::Mutant;
use crate::options::FileOptions;
use crate::parsers::parse;
use crate::source::File;
use crate::span::LineIndex;
use crate::transformer::transform_script;

/// Every mutant registered for `code`, placed or not.
pub fn collect_mutants(file_name: &str, code: &str) -> Vec<Mutant> {
    let file = File::new(file_name, code);
    let mut ast = parse(&file).expect("test code should parse");
    let lines = LineIndex::new(code);
    let mut collector = MutantCollector::new();

    for script in ast.scripts_mut() {
        // Placement failures do not matter here, only what was registered.
        let _ = transform_script(script, file_name, &lines, &mut collector, &FileOptions::default());
    }

    collector.mutants().to_vec()
}

/// Replacement code of every `name` mutant found in TypeScript `code`.
pub fn mutations(name: &str, code: &str) -> Vec<String> {
    mutations_in("test.ts", name, code)
}

pub fn mutations_in(file_name: &str, name: &str, code: &str) -> Vec<String> {
    collect_mutants(file_name, code)
        .into_iter()
        .filter(|m| m.mutator_name == name)
        .map(|m| m.replacement_code)
        .collect()
}

/// Instrumented output of `code` with the `excluded` mutators switched off.
pub fn instrument_code(file_name: &str, code: &str, excluded: &[&str]) -> String {
    let options = FileOptions {
        excluded_mutations: excluded.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        ..Default::default()
    };
    let mut collector = MutantCollector::new();

    instrument_file(&File::new(file_name, code), &options, &mut collector)
        .expect("instrumentation should succeed")
        .content
}
