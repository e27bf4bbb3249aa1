//! The syntax model shared by parsing, mutation and printing.
//!
//! A parsed file is an [`Ast`]: the original text plus a format-tagged
//! root. Script formats hold one swc [`Module`]; markup formats hold the
//! scripts embedded in them together with their byte ranges.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use swc_core::common::comments::SingleThreadedComments;
use swc_core::common::sync::Lrc;
use swc_core::common::{SourceFile, SourceMap, Span};
use swc_core::ecma::ast::Module;

use crate::span::ByteRange;

/// Source format of a file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AstFormat {
    Js,
    Ts,
    Tsx,
    Html,
    Svelte,
}

impl AstFormat {
    /// Detect the format from the file extension.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name)
            .extension()?
            .to_string_lossy()
            .to_ascii_lowercase();

        match ext.as_str() {
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::Js),
            "ts" | "mts" | "cts" => Some(Self::Ts),
            "tsx" => Some(Self::Tsx),
            "html" | "htm" | "vue" => Some(Self::Html),
            "svelte" => Some(Self::Svelte),
            _ => None,
        }
    }

    /// True for formats that are a single script.
    pub fn is_script(self) -> bool {
        matches!(self, Self::Js | Self::Ts | Self::Tsx)
    }

    pub fn is_typescript(self) -> bool {
        matches!(self, Self::Ts | Self::Tsx)
    }
}

impl fmt::Display for AstFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Js => "js",
            Self::Ts => "ts",
            Self::Tsx => "tsx",
            Self::Html => "html",
            Self::Svelte => "svelte",
        };
        f.write_str(name)
    }
}

/// A parsed JavaScript or TypeScript program.
pub struct ScriptAst {
    /// `Js`, `Ts` or `Tsx`.
    pub format: AstFormat,

    /// The script text that was parsed.
    pub raw_content: String,

    /// Byte offset of `raw_content` inside the enclosing file.
    pub offset: usize,

    pub module: Module,

    /// Comments collected while parsing, keyed by position.
    pub comments: SingleThreadedComments,

    pub source_map: Lrc<SourceMap>,
    pub source_file: Lrc<SourceFile>,

    /// Set once at least one mutant was placed in `module`.
    pub instrumented: bool,
}

/// Byte range of `span` relative to the enclosing file, for a script
/// parsed from `source_file` at `offset` in that file.
pub fn span_range(span: Span, source_file: &SourceFile, offset: usize) -> Option<ByteRange> {
    if span.is_dummy() {
        return None;
    }

    let base = source_file.start_pos.0;
    let start = span.lo.0.checked_sub(base)? as usize;
    let end = span.hi.0.checked_sub(base)? as usize;

    Some(ByteRange::new(start, end).offset_by(offset))
}

/// A script block inside a markup file.
pub struct EmbeddedScript {
    /// Byte range of the script text inside the markup file.
    pub range: ByteRange,
    pub ast: ScriptAst,
}

/// Format-specific root of an [`Ast`].
pub enum AstRoot {
    Script(ScriptAst),
    Markup(Vec<EmbeddedScript>),
}

/// A parsed file.
pub struct Ast {
    pub format: AstFormat,
    pub origin_file_name: String,
    pub raw_content: String,
    pub root: AstRoot,
}

impl Ast {
    /// All scripts of this file, in source order.
    pub fn scripts(&self) -> Vec<&ScriptAst> {
        match &self.root {
            AstRoot::Script(script) => vec![script],
            AstRoot::Markup(scripts) => scripts.iter().map(|s| &s.ast).collect(),
        }
    }

    pub fn scripts_mut(&mut self) -> Vec<&mut ScriptAst> {
        match &mut self.root {
            AstRoot::Script(script) => vec![script],
            AstRoot::Markup(scripts) => scripts.iter_mut().map(|s| &mut s.ast).collect(),
        }
    }
}
