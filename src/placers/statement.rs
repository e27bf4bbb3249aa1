use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{BlockStmt, IfStmt, Stmt};

use super::{Anchor, applied_all, ids};
use crate::mutant::Mutant;
use crate::mutators::StmtSlot;
use crate::syntax_helpers::{directive_count, mutant_coverage_statement, mutant_test_expression};

/// Statements that may be moved into an `if` block.
///
/// Declarations would lose their scope, and a labelled loop must stay the
/// direct body of its label.
pub fn can_place(anchor: &Anchor<'_>) -> bool {
    match anchor {
        Anchor::Stmt { stmt, slot } => *slot != StmtSlot::LabelBody && !matches!(stmt, Stmt::Decl(_)),
        Anchor::Block(_) => true,
        _ => false,
    }
}

/// `if (test(n)) { mutant(n) } else if ... else { coverage(ids); original }`
pub fn place(anchor: &mut Anchor<'_>, mutants: &[&Mutant]) -> Result<(), String> {
    match anchor {
        Anchor::Stmt { stmt, .. } => {
            let applied = applied_all(&**stmt, mutants)?;
            let original = (**stmt).clone();

            let fallback = block(vec![mutant_coverage_statement(&ids(mutants)), original]);
            let branches = applied.into_iter().map(|(id, mutated)| (id, as_block(mutated)));

            **stmt = chain(branches, fallback);
            Ok(())
        }
        Anchor::Block(body) => {
            let applied = applied_all(&**body, mutants)?;

            let mut stmts = std::mem::take(&mut body.stmts);
            let rest = stmts.split_off(directive_count(&stmts));

            let mut fallback = vec![mutant_coverage_statement(&ids(mutants))];
            fallback.extend(rest);

            let branches = applied.into_iter().map(|(id, mut mutated)| {
                let at = directive_count(&mutated.stmts);
                (id, block(mutated.stmts.split_off(at)))
            });

            stmts.push(chain(branches, block(fallback)));
            body.stmts = stmts;
            Ok(())
        }
        _ => Err("not a statement".to_string()),
    }
}

/// Wraps `fallback` in one `if` per branch; the last branch ends up outermost.
fn chain(branches: impl Iterator<Item = (usize, BlockStmt)>, fallback: BlockStmt) -> Stmt {
    branches.fold(Stmt::Block(fallback), |alt, (id, cons)| {
        Stmt::If(IfStmt {
            span: DUMMY_SP,
            test: Box::new(mutant_test_expression(id)),
            cons: Box::new(Stmt::Block(cons)),
            alt: Some(Box::new(alt)),
        })
    })
}

fn block(stmts: Vec<Stmt>) -> BlockStmt {
    BlockStmt {
        span: DUMMY_SP,
        stmts,
    }
}

fn as_block(stmt: Stmt) -> BlockStmt {
    match stmt {
        Stmt::Block(block) => block,
        other => block(vec![other]),
    }
}
