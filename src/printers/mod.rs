//! Turning (possibly instrumented) trees back into source text.

use swc_core::common::comments::Comments;
use swc_core::common::sync::Lrc;
use swc_core::common::SourceMap;
use swc_core::ecma::ast::EsVersion;
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::codegen::{Config, Emitter, Node};

use crate::error::InstrumentError;
use crate::mutant::MutantNode;
use crate::patch;
use crate::syntax::{Ast, AstRoot, ScriptAst};

fn codegen_config() -> Config {
    let mut cfg = Config::default();
    cfg.target = EsVersion::EsNext;
    cfg
}

fn emit<N: Node>(
    node: &N,
    source_map: &Lrc<SourceMap>,
    comments: Option<&dyn Comments>,
) -> std::io::Result<String> {
    let mut buf = Vec::new();
    {
        let mut emitter = Emitter {
            cfg: codegen_config(),
            cm: source_map.clone(),
            comments,
            wr: JsWriter::new(source_map.clone(), "\n", &mut buf, None),
        };
        node.emit_with(&mut emitter)?;
    }

    String::from_utf8(buf).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// Render a single node as code, without comments.
///
/// Used to snapshot replacement code when a mutant is registered.
pub fn render<N: Node>(node: &N, source_map: &Lrc<SourceMap>) -> String {
    match emit(node, source_map, None) {
        Ok(code) => code.trim_end().to_string(),
        Err(e) => {
            tracing::warn!("failed to render node: {e}");
            String::new()
        }
    }
}

/// Render the replacement of a mutant.
pub fn render_mutant(node: &MutantNode, source_map: &Lrc<SourceMap>) -> String {
    match node {
        MutantNode::Expr(expr) => render(&**expr, source_map),
        MutantNode::Stmt(stmt) => render(&**stmt, source_map),
        MutantNode::Block(block) => render(block, source_map),
        MutantNode::Case(case) => render(case, source_map),
    }
}

/// Print one script.
///
/// Scripts without placed mutants are returned exactly as they were read.
pub fn print_script(script: &ScriptAst, file_name: &str) -> Result<String, InstrumentError> {
    if !script.instrumented {
        return Ok(script.raw_content.clone());
    }

    emit(
        &script.module,
        &script.source_map,
        Some(&script.comments as &dyn Comments),
    )
    .map_err(|e| InstrumentError::Print {
        file: file_name.to_string(),
        message: e.to_string(),
    })
}

/// Print a whole file.
///
/// Instrumented scripts inside markup are spliced back at their original
/// offsets, surrounded by newlines; all other markup is left untouched.
pub fn print(ast: &Ast) -> Result<String, InstrumentError> {
    match &ast.root {
        AstRoot::Script(script) => print_script(script, &ast.origin_file_name),
        AstRoot::Markup(scripts) => {
            let mut patches = Vec::new();
            for script in scripts.iter().filter(|s| s.ast.instrumented) {
                let code = print_script(&script.ast, &ast.origin_file_name)?;
                patches.push((script.range, format!("\n{code}\n")));
            }
            Ok(patch::splice(&ast.raw_content, &patches))
        }
    }
}
