//! Parsing source files into the [`Ast`] model.
//!
//! JavaScript, TypeScript and TSX go through swc directly. HTML, Vue and
//! Svelte files are scanned for `<script>` blocks, each parsed as its own
//! program with offsets relative to the markup file.

mod html;
mod js;

pub use html::{ScriptBlock, find_scripts};
pub use js::parse_script;

use crate::error::InstrumentError;
use crate::source::File;
use crate::span::LineIndex;
use crate::syntax::{Ast, AstFormat, AstRoot};

/// Parse `file`, picking the parser from its extension.
pub fn parse(file: &File) -> Result<Ast, InstrumentError> {
    let format = AstFormat::from_file_name(&file.name).ok_or_else(|| {
        InstrumentError::UnsupportedFormat {
            file: file.name.clone(),
            extension: file.extension().unwrap_or_default(),
        }
    })?;

    let lines = LineIndex::new(&file.content);

    let root = if format.is_script() {
        AstRoot::Script(parse_script(&file.content, &file.name, format, 0, &lines)?)
    } else {
        AstRoot::Markup(html::parse_markup(&file.content, &file.name, &lines)?)
    };

    tracing::debug!(file = %file.name, %format, "parsed");

    Ok(Ast {
        format,
        origin_file_name: file.name.clone(),
        raw_content: file.content.clone(),
        root,
    })
}
