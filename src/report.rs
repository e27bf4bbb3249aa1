use std::collections::BTreeMap;

use crate::mutant::{ApiMutant, MutantStatus};
use crate::span::{ByteRange, LineIndex};

/// Mutant counts for one mutator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutatorCount {
    pub mutator_name: String,
    pub total: usize,
    pub ignored: usize,
}

impl MutatorCount {
    pub fn placed(&self) -> usize {
        self.total - self.ignored
    }
}

/// Per-mutator counts, sorted by mutator name.
pub fn summarize(mutants: &[ApiMutant]) -> Vec<MutatorCount> {
    let mut counts: BTreeMap<&str, MutatorCount> = BTreeMap::new();

    for m in mutants {
        let entry = counts
            .entry(m.mutator_name.as_str())
            .or_insert_with(|| MutatorCount {
                mutator_name: m.mutator_name.clone(),
                ..Default::default()
            });
        entry.total += 1;
        if m.status == Some(MutantStatus::Ignored) {
            entry.ignored += 1;
        }
    }

    counts.into_values().collect()
}

/// Format one mutant as a single, readable line with a 1-based position.
pub fn format_mutant(m: &ApiMutant) -> String {
    let mut line = format!(
        "#{id} {file}:{line}:{column} {mutator}: {replacement:?}",
        id = m.id,
        file = m.file_name,
        line = m.location.start.line + 1,
        column = m.location.start.column + 1,
        mutator = m.mutator_name,
        replacement = m.replacement,
    );

    if m.status == Some(MutantStatus::Ignored) {
        line.push_str(" (ignored)");
    }

    line
}

/// Source excerpt pointing at `range`: the first line of the range with
/// up to two lines of context above, and a caret underline.
///
/// `None` when the range does not fall inside the indexed text.
pub fn code_frame(lines: &LineIndex, range: ByteRange) -> Option<String> {
    let start = lines.position(range.start);
    let end = lines.position(range.end);
    let text = lines.line_text(start.line)?;

    let first = start.line.saturating_sub(2);
    let gutter = (start.line + 1).to_string().len();

    let mut frame = Vec::new();
    for line in first..=start.line {
        let marker = if line == start.line { '>' } else { ' ' };
        let content = lines.line_text(line)?;
        frame.push(format!("{marker} {:>gutter$} | {content}", line + 1).trim_end().to_string());
    }

    let width = if end.line == start.line {
        end.column.saturating_sub(start.column)
    } else {
        text.chars().count().saturating_sub(start.column)
    };
    frame.push(format!(
        "  {:>gutter$} | {}{}",
        "",
        " ".repeat(start.column),
        "^".repeat(width.max(1))
    ));

    Some(frame.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::{Location, Position};

    fn api_mutant(id: usize, mutator: &str, ignored: bool) -> ApiMutant {
        ApiMutant {
            file_name: "src/add.js".to_string(),
            id,
            location: Location {
                start: Position { line: 2, column: 10 },
                end: Position { line: 2, column: 15 },
            },
            mutator_name: mutator.to_string(),
            range: [30, 35],
            replacement: "a - b".to_string(),
            status: ignored.then_some(MutantStatus::Ignored),
            status_reason: ignored.then(|| format!("Ignored because of excluded mutation \"{mutator}\"")),
        }
    }

    #[test]
    fn format_mutant_is_stable() {
        insta::assert_snapshot!(
            format_mutant(&api_mutant(7, "ArithmeticOperator", false)),
            @r#"#7 src/add.js:3:11 ArithmeticOperator: "a - b""#
        );
        insta::assert_snapshot!(
            format_mutant(&api_mutant(8, "StringLiteral", true)),
            @r#"#8 src/add.js:3:11 StringLiteral: "a - b" (ignored)"#
        );
    }

    #[test]
    fn summary_counts_per_mutator() {
        let mutants = vec![
            api_mutant(0, "StringLiteral", true),
            api_mutant(1, "ArithmeticOperator", false),
            api_mutant(2, "StringLiteral", false),
            api_mutant(3, "StringLiteral", true),
        ];

        let summary = summarize(&mutants);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].mutator_name, "ArithmeticOperator");
        assert_eq!((summary[0].total, summary[0].ignored), (1, 0));
        assert_eq!(summary[1].mutator_name, "StringLiteral");
        assert_eq!((summary[1].total, summary[1].ignored), (3, 2));
        assert_eq!(summary[1].placed(), 1);
    }

    #[test]
    fn code_frame_underlines_the_range() {
        let code = "function f() {\n  const a = 1;\n  return a + b;\n}\n";
        let lines = LineIndex::new(code);
        let start = code.find("a + b").expect("present");

        let frame = code_frame(&lines, ByteRange::new(start, start + 5)).expect("frame");
        insta::assert_snapshot!(frame, @r"
          1 | function f() {
          2 |   const a = 1;
        > 3 |   return a + b;
            |          ^^^^^
        ");
    }

    #[test]
    fn code_frame_on_the_first_line_has_no_context() {
        let lines = LineIndex::new("a\n");
        assert_eq!(
            code_frame(&lines, ByteRange::new(0, 1)).as_deref(),
            Some("> 1 | a\n    | ^")
        );
    }
}
