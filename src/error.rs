//! Error types for parsing, instrumenting and printing.

/// Errors raised while instrumenting a single file.
///
/// Every variant is fatal for the file it names; other files of the same
/// batch are unaffected.
#[derive(Debug, thiserror::Error)]
pub enum InstrumentError {
    /// No parser is registered for the file's extension.
    #[error("unable to parse {file}: no parser registered for extension {extension:?}")]
    UnsupportedFormat { file: String, extension: String },

    /// The parser rejected the file.
    #[error("syntax error in {file}:{line}:{column}: {message}")]
    Parse {
        file: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// A placer accepted an anchor node but failed to rewrite it.
    #[error("{0}")]
    Placement(PlacementError),

    /// Mutants were still pending once the whole file had been walked.
    #[error("{0}")]
    UnplacedMutants(PlacementError),

    /// The bootstrap header could not be built.
    #[error("failed to build the instrumentation header: {0}")]
    Header(String),

    /// Code generation failed.
    #[error("failed to print {file}: {message}")]
    Print { file: String, message: String },

    /// An option refers to something that does not exist.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl InstrumentError {
    /// Name of the file this error belongs to, when known.
    pub fn file(&self) -> Option<&str> {
        match self {
            Self::UnsupportedFormat { file, .. }
            | Self::Parse { file, .. }
            | Self::Print { file, .. } => Some(file),
            Self::Placement(e) | Self::UnplacedMutants(e) => Some(&e.file),
            Self::Header(_) | Self::InvalidOptions(_) => None,
        }
    }
}

/// Mutants that could not be spliced into the tree.
///
/// `line` and `column` are 1-based. `code_frame` is absent when the
/// offending node carries no source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementError {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub placer: Option<&'static str>,
    pub mutator_names: Vec<&'static str>,
    pub reason: String,
    pub code_frame: Option<String>,
}

impl PlacementError {
    /// The message without the code frame.
    pub fn message(&self) -> String {
        let subject = match self.placer {
            Some(placer) => format!("{placer} could not place mutants"),
            None => "could not place mutants".to_string(),
        };
        format!(
            "{file}:{line}:{column} {subject} with type(s): \"{types}\" ({reason}). \
             Either remove this file from the list of files to be mutated, \
             or exclude the mutator using the excluded mutations option.",
            file = self.file,
            line = self.line,
            column = self.column,
            types = self.mutator_names.join(", "),
            reason = self.reason,
        )
    }
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())?;
        if let Some(frame) = &self.code_frame {
            write!(f, "\n{frame}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement_error(code_frame: Option<String>) -> PlacementError {
        PlacementError {
            file: "src/add.js".to_string(),
            line: 3,
            column: 7,
            placer: Some("expressionMutantPlacer"),
            mutator_names: vec!["ArithmeticOperator", "StringLiteral"],
            reason: "original node not found".to_string(),
            code_frame,
        }
    }

    #[test]
    fn placement_message_names_location_and_mutators() {
        insta::assert_snapshot!(
            placement_error(None).to_string(),
            @r#"src/add.js:3:7 expressionMutantPlacer could not place mutants with type(s): "ArithmeticOperator, StringLiteral" (original node not found). Either remove this file from the list of files to be mutated, or exclude the mutator using the excluded mutations option."#
        );
    }

    #[test]
    fn code_frame_is_appended_when_present() {
        let err = placement_error(Some("> 3 | a + b".to_string()));
        let text = err.to_string();
        assert!(text.ends_with("\n> 3 | a + b"));
        assert!(text.starts_with(&err.message()));
    }

    #[test]
    fn file_is_reported_for_placement_errors() {
        let err = InstrumentError::UnplacedMutants(placement_error(None));
        assert_eq!(err.file(), Some("src/add.js"));
        assert_eq!(InstrumentError::InvalidOptions("x".into()).file(), None);
    }
}
