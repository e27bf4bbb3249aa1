use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{BlockStmt, IfStmt, Stmt};

use super::{Anchor, applied_all, ids};
use crate::mutant::Mutant;
use crate::syntax_helpers::{mutant_coverage_statement, mutant_test_expression};

pub fn can_place(anchor: &Anchor<'_>) -> bool {
    matches!(anchor, Anchor::Case(_))
}

/// `case x: if (test(n)) { mutant(n) } else ... else { coverage(ids); original }`
///
/// The test of the case is kept; only its consequent is guarded.
pub fn place(anchor: &mut Anchor<'_>, mutants: &[&Mutant]) -> Result<(), String> {
    let Anchor::Case(case) = anchor else {
        return Err("not a switch case".to_string());
    };

    let applied = applied_all(&**case, mutants)?;

    let mut fallback = vec![mutant_coverage_statement(&ids(mutants))];
    fallback.append(&mut case.cons);

    let guarded = applied
        .into_iter()
        .fold(Stmt::Block(block(fallback)), |alt, (id, mutated)| {
            Stmt::If(IfStmt {
                span: DUMMY_SP,
                test: Box::new(mutant_test_expression(id)),
                cons: Box::new(Stmt::Block(block(mutated.cons))),
                alt: Some(Box::new(alt)),
            })
        });

    case.cons = vec![guarded];
    Ok(())
}

fn block(stmts: Vec<Stmt>) -> BlockStmt {
    BlockStmt {
        span: DUMMY_SP,
        stmts,
    }
}
