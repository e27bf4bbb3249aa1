//! Strip `@ts-*` directive comments and turn type checking off.
//!
//! Instrumented code is rarely type correct, so every file handed to a
//! TypeScript-aware runner gets a `// @ts-nocheck` directive, and any
//! directive that could turn checking back on (or expect an error that no
//! longer happens) is cut out of its comment.

use std::sync::LazyLock;

use regex::Regex;
use swc_core::common::comments::Comment;

use crate::error::InstrumentError;
use crate::parsers::parse;
use crate::patch;
use crate::source::File;
use crate::span::ByteRange;
use crate::syntax::{AstFormat, AstRoot, ScriptAst};

pub const NO_CHECK: &str = "// @ts-nocheck";

static DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(ts-[a-z-]+)").expect("valid directive regex"));

static DIRECTIVE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)@(ts-[a-z-]+).*$").expect("valid directive comment regex"));

static SHEBANG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#!.*").expect("valid shebang regex"));

static LEADING_BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*/\*.*?\*/").expect("valid block comment regex"));

/// Run the pass on one file.
///
/// Scripts without any `@ts-` text are only prefixed; everything else is
/// parsed so that directives inside strings or templates stay untouched.
pub fn disable_type_checks(file: &File) -> Result<File, InstrumentError> {
    let format = AstFormat::from_file_name(&file.name).ok_or_else(|| {
        InstrumentError::UnsupportedFormat {
            file: file.name.clone(),
            extension: file.extension().unwrap_or_default(),
        }
    })?;

    if format.is_script() && !DIRECTIVE.is_match(&file.content) {
        return Ok(File::new(file.name.clone(), prefix_no_check(&file.content)));
    }

    let ast = parse(file)?;
    let content = match &ast.root {
        AstRoot::Script(script) => without_directives(script),
        AstRoot::Markup(scripts) => {
            let patches: Vec<(ByteRange, String)> = scripts
                .iter()
                .map(|s| (s.range, format!("\n{}\n", without_directives(&s.ast))))
                .collect();
            patch::splice(&file.content, &patches)
        }
    };

    tracing::debug!(file = %file.name, "disabled type checks");
    Ok(File::new(file.name.clone(), content))
}

/// The script text with directive comments excised, prefixed with the
/// no-check directive.
fn without_directives(script: &ScriptAst) -> String {
    let base = script.source_file.start_pos.0;
    let (leading, trailing) = script.comments.borrow_all();

    let mut ranges: Vec<ByteRange> = leading
        .values()
        .chain(trailing.values())
        .flatten()
        .filter_map(|comment| directive_range(comment, base))
        .collect();
    ranges.sort();
    ranges.dedup();

    prefix_no_check(&patch::remove_ranges(&script.raw_content, &ranges))
}

/// Range of `@ts-name` inside `comment`, relative to the script text.
fn directive_range(comment: &Comment, base: u32) -> Option<ByteRange> {
    let caps = DIRECTIVE_COMMENT.captures(&comment.text)?;
    let indent = caps.get(1)?.as_str().len();
    let name = caps.get(2)?.as_str();

    // Both `//` and `/*` are two bytes wide.
    let start = (comment.span.lo.0.checked_sub(base)? as usize) + 2 + indent;
    Some(ByteRange::new(start, start + name.len() + 1))
}

/// Insert `// @ts-nocheck` after a shebang line or a single leading block
/// comment, or at the very top.
pub fn prefix_no_check(code: &str) -> String {
    let head = SHEBANG
        .find(code)
        .or_else(|| LEADING_BLOCK_COMMENT.find(code));

    match head {
        Some(head) => format!(
            "{}\n{NO_CHECK}\n{}",
            &code[..head.end()],
            &code[head.end()..]
        ),
        None => format!("{NO_CHECK}\n{code}"),
    }
}
