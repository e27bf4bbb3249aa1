use std::collections::BTreeSet;

use crate::mutant::{ApiMutant, Mutant, MutantNode, NodeKey};
use crate::span::{ByteRange, Location};

/// A mutant as produced by a mutator, before it has an id.
#[derive(Debug, Clone)]
pub struct NewMutant {
    pub mutator_name: &'static str,
    pub original: NodeKey,
    pub replacement: MutantNode,

    /// Byte range of the original node in its file.
    pub range: ByteRange,
    pub location: Location,
    pub replacement_code: String,
    pub ignore_reason: Option<String>,
}

/// Registry of every mutant created during one instrumentation run.
///
/// Ids are dense and follow registration order. Mutants that still wait for
/// a placer are tracked separately; ignored mutants never wait.
#[derive(Debug, Default)]
pub struct MutantCollector {
    mutants: Vec<Mutant>,
    unplaced: BTreeSet<usize>,
}

impl MutantCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mutant for `file_name` and assign it the next id.
    pub fn add(&mut self, file_name: &str, new: NewMutant) -> &Mutant {
        let id = self.mutants.len();

        if new.ignore_reason.is_none() {
            self.unplaced.insert(id);
        }

        self.mutants.push(Mutant {
            id,
            file_name: file_name.to_string(),
            mutator_name: new.mutator_name,
            original: new.original,
            replacement: new.replacement,
            range: new.range,
            location: new.location,
            replacement_code: new.replacement_code,
            ignore_reason: new.ignore_reason,
        });

        &self.mutants[id]
    }

    /// Unplaced mutants whose range lies fully inside `scope`, in
    /// registration order.
    pub fn find_unplaced_mutants_in_scope(&self, scope: ByteRange) -> Vec<&Mutant> {
        self.unplaced
            .iter()
            .map(|&id| &self.mutants[id])
            .filter(|m| scope.contains(&m.range))
            .collect()
    }

    /// Unplaced mutants of one file, in registration order.
    pub fn unplaced_mutants_in_file(&self, file_name: &str) -> Vec<&Mutant> {
        self.unplaced
            .iter()
            .map(|&id| &self.mutants[id])
            .filter(|m| m.file_name == file_name)
            .collect()
    }

    pub fn mark_mutants_as_placed(&mut self, ids: &[usize]) {
        for id in ids {
            self.unplaced.remove(id);
        }
    }

    /// True if at least one non-ignored mutant of `file_name` was placed.
    pub fn has_placed_mutants(&self, file_name: &str) -> bool {
        self.mutants
            .iter()
            .any(|m| m.file_name == file_name && !m.is_ignored() && !self.unplaced.contains(&m.id))
    }

    pub fn mutants(&self) -> &[Mutant] {
        &self.mutants
    }

    pub fn api_mutants(&self) -> Vec<ApiMutant> {
        self.mutants.iter().map(Mutant::to_api_mutant).collect()
    }

    /// Marker to return to with [`MutantCollector::rollback`].
    pub fn checkpoint(&self) -> usize {
        self.mutants.len()
    }

    /// Forget every mutant registered after `checkpoint`.
    ///
    /// Used when a file fails, so that the ids of emitted files stay dense.
    pub fn rollback(&mut self, checkpoint: usize) {
        self.mutants.truncate(checkpoint);
        self.unplaced.retain(|&id| id < checkpoint);
    }
}
