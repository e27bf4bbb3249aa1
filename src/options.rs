use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::InstrumentError;
use crate::mutators::Mutator;
use crate::span::ByteRange;

/// Options for one instrumentation run.
///
/// Loaded from a JSON file (`camelCase` keys) and/or built from CLI flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct InstrumenterOptions {
    /// Mutator names whose mutants are recorded as ignored and never placed.
    pub excluded_mutations: BTreeSet<String>,

    /// Restricts mutation to these ranges. Files without a range are
    /// mutated in full.
    pub mutation_ranges: Vec<MutationRange>,
}

/// A byte range of one file that is eligible for mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MutationRange {
    pub file_name: String,
    pub start: usize,
    pub end: usize,
}

impl MutationRange {
    /// Parse `FILE:START-END`.
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        let (file_name, range) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("expected FILE:START-END, got {s:?}"))?;
        let (start, end) = range
            .split_once('-')
            .ok_or_else(|| format!("expected START-END after the file name, got {range:?}"))?;

        let parse_offset = |text: &str| {
            text.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid byte offset {text:?}: {e}"))
        };

        Ok(Self {
            file_name: file_name.to_string(),
            start: parse_offset(start)?,
            end: parse_offset(end)?,
        })
    }

    pub fn range(&self) -> ByteRange {
        ByteRange::new(self.start, self.end)
    }
}

impl InstrumenterOptions {
    /// Load options from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read options file {:?}", path))?;

        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse options file {:?}", path))
    }

    /// Reject unknown mutator names and inverted ranges.
    pub fn validate(&self) -> std::result::Result<(), InstrumentError> {
        if let Some(unknown) = self
            .excluded_mutations
            .iter()
            .find(|name| Mutator::from_name(name).is_none())
        {
            let valid: Vec<&str> = Mutator::ALL.iter().map(|m| m.name()).collect();
            return Err(InstrumentError::InvalidOptions(format!(
                "unknown mutator {unknown:?} in excludedMutations, expected one of: {}",
                valid.join(", ")
            )));
        }

        if let Some(range) = self.mutation_ranges.iter().find(|r| r.start > r.end) {
            return Err(InstrumentError::InvalidOptions(format!(
                "mutation range {}:{}-{} ends before it starts",
                range.file_name, range.start, range.end
            )));
        }

        Ok(())
    }

    /// The options that apply to `file_name`.
    pub fn for_file(&self, file_name: &str) -> FileOptions {
        FileOptions {
            excluded_mutations: self.excluded_mutations.clone(),
            mutation_ranges: self
                .mutation_ranges
                .iter()
                .filter(|r| r.file_name == file_name)
                .map(MutationRange::range)
                .collect(),
        }
    }
}

/// Options resolved for a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOptions {
    pub excluded_mutations: BTreeSet<String>,
    pub mutation_ranges: Vec<ByteRange>,
}

impl FileOptions {
    pub fn is_excluded(&self, mutator_name: &str) -> bool {
        self.excluded_mutations.contains(mutator_name)
    }

    /// True when a node spanning `range` may be mutated.
    pub fn is_eligible(&self, range: ByteRange) -> bool {
        self.mutation_ranges.is_empty() || self.mutation_ranges.iter().any(|r| r.contains(&range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_camel_case_json() {
        let dir = tempfile::TempDir::new().expect("TempDir should create");
        let path = dir.path().join("options.json");
        fs::write(
            &path,
            r#"{
                "excludedMutations": ["StringLiteral"],
                "mutationRanges": [{ "fileName": "src/a.js", "start": 4, "end": 9 }]
            }"#,
        )
        .unwrap();

        let options = InstrumenterOptions::load(&path).expect("should load");
        assert!(options.excluded_mutations.contains("StringLiteral"));
        assert_eq!(
            options.mutation_ranges,
            vec![MutationRange {
                file_name: "src/a.js".to_string(),
                start: 4,
                end: 9
            }]
        );
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let options: InstrumenterOptions = serde_json::from_str("{}").expect("should parse");
        assert_eq!(options, InstrumenterOptions::default());
    }

    #[test]
    fn rejects_unknown_mutators() {
        let options = InstrumenterOptions {
            excluded_mutations: BTreeSet::from(["Regex".to_string()]),
            ..Default::default()
        };

        let err = options.validate().expect_err("Regex is not a mutator");
        let text = err.to_string();
        assert!(text.starts_with("invalid options: unknown mutator \"Regex\""), "{text}");
        assert!(text.contains("ArithmeticOperator"));
    }

    #[test]
    fn parses_cli_ranges() {
        let range = MutationRange::parse("src/a:b.js:10-20").expect("should parse");
        assert_eq!(range.file_name, "src/a:b.js");
        assert_eq!(range.range(), ByteRange::new(10, 20));

        assert!(MutationRange::parse("src/a.js").is_err());
        assert!(MutationRange::parse("src/a.js:10").is_err());
        assert!(MutationRange::parse("src/a.js:x-2").is_err());
    }

    #[test]
    fn ranges_apply_per_file() {
        let options = InstrumenterOptions {
            mutation_ranges: vec![MutationRange::parse("a.js:5-10").expect("valid")],
            ..Default::default()
        };

        let a = options.for_file("a.js");
        assert!(a.is_eligible(ByteRange::new(5, 10)));
        assert!(a.is_eligible(ByteRange::new(6, 8)));
        assert!(!a.is_eligible(ByteRange::new(4, 8)));

        let b = options.for_file("b.js");
        assert!(b.is_eligible(ByteRange::new(0, 100)));
    }
}
