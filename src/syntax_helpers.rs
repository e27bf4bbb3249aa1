//! Builders for the code that instrumentation adds around mutants.
//!
//! At runtime every instrumented file shares one global object:
//!
//! - `__activeMutant__`: id of the mutant to run, absent for none
//! - `__coverMutant__(...ids)`: counts a visit of each id
//! - `__mutantCoverage__`: `{ static: {}, perTest: { [testId]: {} } }`,
//!   each bucket mapping mutant ids to visit counts
//! - `__currentTestId__`: set by the test runner while a test executes

use std::sync::LazyLock;

use swc_core::common::sync::Lrc;
use swc_core::common::{DUMMY_SP, FileName, SourceMap, Span};
use swc_core::ecma::ast::{
    BinExpr, BinaryOp, CallExpr, Callee, EsVersion, Expr, ExprOrSpread, ExprStmt, Ident, Lit,
    MemberExpr, MemberProp, Module, ModuleItem, Number, ParenExpr, SeqExpr, Stmt,
};
use swc_core::ecma::parser::{EsConfig, Parser, StringInput, Syntax, lexer::Lexer};
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

use crate::error::InstrumentError;

pub const GLOBAL: &str = "__global_69fa48";
pub const ACTIVE_MUTANT: &str = "__activeMutant__";
pub const COVER_MUTANT: &str = "__coverMutant__";
pub const MUTANT_COVERAGE: &str = "__mutantCoverage__";
pub const CURRENT_TEST_ID: &str = "__currentTestId__";

static HEADER_SOURCE: LazyLock<String> = LazyLock::new(|| {
    format!(
        r#"var {GLOBAL} = (function (g) {{
  g.{MUTANT_COVERAGE} = g.{MUTANT_COVERAGE} || {{ static: {{}}, perTest: {{}} }};
  g.{COVER_MUTANT} = g.{COVER_MUTANT} || function () {{
    var c = g.{MUTANT_COVERAGE}.static;
    if (g.{CURRENT_TEST_ID}) {{
      c = g.{MUTANT_COVERAGE}.perTest[g.{CURRENT_TEST_ID}] = g.{MUTANT_COVERAGE}.perTest[g.{CURRENT_TEST_ID}] || {{}};
    }}
    var a = arguments;
    for (var i = 0; i < a.length; i++) {{
      c[a[i]] = (c[a[i]] || 0) + 1;
    }}
  }};
  return g;
}})(new Function("return this")());"#
    )
});

/// The bootstrap declaration that wires up the global object.
pub fn header_source() -> &'static str {
    &HEADER_SOURCE
}

struct ResetSpans;

impl VisitMut for ResetSpans {
    fn visit_mut_span(&mut self, span: &mut Span) {
        *span = DUMMY_SP;
    }
}

/// Parse the bootstrap header into statements without source positions.
pub fn header_statements() -> Result<Vec<ModuleItem>, InstrumentError> {
    let source_map: Lrc<SourceMap> = Default::default();
    let file = source_map.new_source_file(
        FileName::Custom("instrumentation-header.js".into()),
        header_source().to_string(),
    );
    let lexer = Lexer::new(
        Syntax::Es(EsConfig::default()),
        EsVersion::EsNext,
        StringInput::from(&*file),
        None,
    );

    let mut module: Module = Parser::new_from(lexer)
        .parse_module()
        .map_err(|e| InstrumentError::Header(e.kind().msg().to_string()))?;

    module.visit_mut_with(&mut ResetSpans);
    Ok(module.body)
}

/// Number of leading directive statements (`"use strict"` and friends).
pub fn directive_count(stmts: &[Stmt]) -> usize {
    stmts.iter().take_while(|stmt| is_directive(stmt)).count()
}

pub fn is_directive(stmt: &Stmt) -> bool {
    matches!(stmt, Stmt::Expr(ExprStmt { expr, .. }) if matches!(&**expr, Expr::Lit(Lit::Str(_))))
}

/// Insert the bootstrap header after the module's directive prologue.
pub fn insert_header(module: &mut Module) -> Result<(), InstrumentError> {
    let at = module
        .body
        .iter()
        .take_while(|item| matches!(item, ModuleItem::Stmt(stmt) if is_directive(stmt)))
        .count();

    let header = header_statements()?;
    module.body.splice(at..at, header);
    Ok(())
}

fn ident(name: &str) -> Ident {
    Ident::new(name.into(), DUMMY_SP)
}

fn global_member(name: &str) -> Expr {
    Expr::Member(MemberExpr {
        span: DUMMY_SP,
        obj: Box::new(Expr::Ident(ident(GLOBAL))),
        prop: MemberProp::Ident(ident(name)),
    })
}

fn id_literal(id: usize) -> Expr {
    Expr::Lit(Lit::Num(Number {
        span: DUMMY_SP,
        value: id as f64,
        raw: None,
    }))
}

/// `__global_69fa48.__activeMutant__ === id`
pub fn mutant_test_expression(id: usize) -> Expr {
    Expr::Bin(BinExpr {
        span: DUMMY_SP,
        op: BinaryOp::EqEqEq,
        left: Box::new(global_member(ACTIVE_MUTANT)),
        right: Box::new(id_literal(id)),
    })
}

/// `__global_69fa48.__coverMutant__(ids...)`
pub fn mutant_coverage_call(ids: &[usize]) -> Expr {
    Expr::Call(CallExpr {
        span: DUMMY_SP,
        callee: Callee::Expr(Box::new(global_member(COVER_MUTANT))),
        args: ids
            .iter()
            .map(|&id| ExprOrSpread {
                spread: None,
                expr: Box::new(id_literal(id)),
            })
            .collect(),
        type_args: None,
    })
}

/// `__global_69fa48.__coverMutant__(ids...);`
pub fn mutant_coverage_statement(ids: &[usize]) -> Stmt {
    Stmt::Expr(ExprStmt {
        span: DUMMY_SP,
        expr: Box::new(mutant_coverage_call(ids)),
    })
}

/// `(__global_69fa48.__coverMutant__(ids...), expr)`
pub fn covered_expression(ids: &[usize], expr: Expr) -> Expr {
    paren(Expr::Seq(SeqExpr {
        span: DUMMY_SP,
        exprs: vec![Box::new(mutant_coverage_call(ids)), Box::new(expr)],
    }))
}

pub fn paren(expr: Expr) -> Expr {
    Expr::Paren(ParenExpr {
        span: DUMMY_SP,
        expr: Box::new(expr),
    })
}
