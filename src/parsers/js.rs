use swc_core::common::comments::{Comments, SingleThreadedComments};
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceMap, Span, Spanned};
use swc_core::ecma::ast::EsVersion;
use swc_core::ecma::parser::{EsConfig, Parser, StringInput, Syntax, TsConfig, lexer::Lexer};

use crate::error::InstrumentError;
use crate::span::LineIndex;
use crate::syntax::{AstFormat, ScriptAst};

/// Parser configuration for a script format.
///
/// JSX is always enabled for plain JavaScript; TypeScript only enables it
/// for `.tsx`, since `<T>expr` casts would otherwise be ambiguous.
fn syntax_for(format: AstFormat, file_name: &str) -> Syntax {
    if format.is_typescript() {
        Syntax::Typescript(TsConfig {
            tsx: format == AstFormat::Tsx,
            decorators: true,
            dts: file_name.ends_with(".d.ts"),
            ..Default::default()
        })
    } else {
        Syntax::Es(EsConfig {
            jsx: true,
            decorators: true,
            ..Default::default()
        })
    }
}

/// Parse one script into a [`ScriptAst`].
///
/// `offset` is the byte offset of `text` inside the file named `file_name`,
/// and `lines` indexes that whole file so that syntax errors are reported
/// with file-relative 1-based positions.
pub fn parse_script(
    text: &str,
    file_name: &str,
    format: AstFormat,
    offset: usize,
    lines: &LineIndex,
) -> Result<ScriptAst, InstrumentError> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file =
        source_map.new_source_file(FileName::Custom(file_name.to_string()), text.to_string());
    let comments = SingleThreadedComments::default();

    let module = {
        let lexer = Lexer::new(
            syntax_for(format, file_name),
            EsVersion::EsNext,
            StringInput::from(&*source_file),
            Some(&comments as &dyn Comments),
        );
        let mut parser = Parser::new_from(lexer);

        let module = parser.parse_module().map_err(|e| {
            syntax_error(file_name, lines, offset, source_file.start_pos.0, e.span(), &e.kind().msg())
        })?;

        // Recoverable errors still mean the tree is not what the author wrote.
        if let Some(e) = parser.take_errors().into_iter().next() {
            return Err(syntax_error(
                file_name,
                lines,
                offset,
                source_file.start_pos.0,
                e.span(),
                &e.kind().msg(),
            ));
        }

        module
    };

    Ok(ScriptAst {
        format,
        raw_content: text.to_string(),
        offset,
        module,
        comments,
        source_map,
        source_file,
        instrumented: false,
    })
}

fn syntax_error(
    file_name: &str,
    lines: &LineIndex,
    offset: usize,
    base: u32,
    span: Span,
    message: &str,
) -> InstrumentError {
    let local = span.lo.0.saturating_sub(base) as usize;
    let position = lines.position(offset + local);

    InstrumentError::Parse {
        file: file_name.to_string(),
        line: position.line + 1,
        column: position.column + 1,
        message: message.to_string(),
    }
}
