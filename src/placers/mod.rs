//! Splicing mutants into the tree.
//!
//! Placers are tried in order on every node on the way back up the walk.
//! The first one that accepts the node rewrites it so that each mutant runs
//! only while it is the active one, and so that reaching the original code
//! records coverage for all of them.

mod expression;
mod statement;
mod switch_case;

use swc_core::common::Spanned;
use swc_core::ecma::ast::{BlockStmt, Expr, Stmt, SwitchCase};
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

use crate::mutant::{Mutant, MutantNode, NodeKey, NodeKind};
use crate::mutators::{ExprSlot, StmtSlot};

/// A node that may host mutants, with what is known about its position.
pub enum Anchor<'a> {
    Expr { expr: &'a mut Expr, slot: &'a ExprSlot },
    Stmt { stmt: &'a mut Stmt, slot: StmtSlot },
    Block(&'a mut BlockStmt),
    Case(&'a mut SwitchCase),
}

/// A mutant placer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placer {
    Expression,
    Statement,
    SwitchCase,
}

impl Placer {
    /// Placers in the order they are tried.
    pub const CHAIN: [Placer; 3] = [Self::Expression, Self::Statement, Self::SwitchCase];

    pub fn name(self) -> &'static str {
        match self {
            Self::Expression => "expressionMutantPlacer",
            Self::Statement => "statementMutantPlacer",
            Self::SwitchCase => "switchCaseMutantPlacer",
        }
    }

    pub fn can_place(self, anchor: &Anchor<'_>) -> bool {
        match self {
            Self::Expression => expression::can_place(anchor),
            Self::Statement => statement::can_place(anchor),
            Self::SwitchCase => switch_case::can_place(anchor),
        }
    }

    /// Rewrite `anchor` to host `mutants`.
    ///
    /// Only called when [`Placer::can_place`] accepted the anchor. Mutants
    /// are given in ascending id order; the highest id ends up outermost.
    /// The error is a short reason for the failure.
    pub fn place(self, anchor: &mut Anchor<'_>, mutants: &[&Mutant]) -> Result<(), String> {
        match self {
            Self::Expression => expression::place(anchor, mutants),
            Self::Statement => statement::place(anchor, mutants),
            Self::SwitchCase => switch_case::place(anchor, mutants),
        }
    }
}

/// Swaps the first node (in pre-order) that matches `key` for `replacement`.
struct Substitute {
    key: NodeKey,
    replacement: Option<MutantNode>,
}

impl Substitute {
    fn take_if_match(&mut self, kind: NodeKind, span: swc_core::common::Span) -> Option<MutantNode> {
        if self.replacement.is_some() && self.key.matches(kind, span) {
            self.replacement.take()
        } else {
            None
        }
    }

    fn done(&self) -> bool {
        self.replacement.is_none()
    }
}

impl VisitMut for Substitute {
    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if self.done() {
            return;
        }
        match self.take_if_match(NodeKind::Expression, expr.span()) {
            Some(MutantNode::Expr(replacement)) => *expr = *replacement,
            Some(other) => self.replacement = Some(other),
            None => expr.visit_mut_children_with(self),
        }
    }

    fn visit_mut_stmt(&mut self, stmt: &mut Stmt) {
        if self.done() {
            return;
        }
        match self.take_if_match(NodeKind::Statement, stmt.span()) {
            Some(MutantNode::Stmt(replacement)) => *stmt = *replacement,
            Some(other) => self.replacement = Some(other),
            None => stmt.visit_mut_children_with(self),
        }
    }

    fn visit_mut_block_stmt(&mut self, block: &mut BlockStmt) {
        if self.done() {
            return;
        }
        match self.take_if_match(NodeKind::Block, block.span) {
            Some(MutantNode::Block(replacement)) => *block = replacement,
            Some(other) => self.replacement = Some(other),
            None => block.visit_mut_children_with(self),
        }
    }

    fn visit_mut_switch_case(&mut self, case: &mut SwitchCase) {
        if self.done() {
            return;
        }
        match self.take_if_match(NodeKind::SwitchCase, case.span) {
            Some(MutantNode::Case(replacement)) => *case = replacement,
            Some(other) => self.replacement = Some(other),
            None => case.visit_mut_children_with(self),
        }
    }
}

/// A copy of `anchor` with `mutant` applied.
///
/// The mutant's original node is either `anchor` itself or somewhere below it.
fn applied<N>(anchor: &N, mutant: &Mutant) -> Result<N, String>
where
    N: Clone + VisitMutWith<Substitute>,
{
    let mut copy = anchor.clone();
    let mut substitute = Substitute {
        key: mutant.original,
        replacement: Some(mutant.replacement.clone()),
    };
    copy.visit_mut_with(&mut substitute);

    if substitute.done() {
        Ok(copy)
    } else {
        Err(format!(
            "original node of mutant {} not found under the anchor",
            mutant.id
        ))
    }
}

/// Applied copies of `anchor` for each mutant, keyed by mutant id.
fn applied_all<N>(anchor: &N, mutants: &[&Mutant]) -> Result<Vec<(usize, N)>, String>
where
    N: Clone + VisitMutWith<Substitute>,
{
    mutants
        .iter()
        .map(|m| Ok((m.id, applied(anchor, m)?)))
        .collect()
}

fn ids(mutants: &[&Mutant]) -> Vec<usize> {
    mutants.iter().map(|m| m.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::{ByteRange, Location};
    use swc_core::common::{BytePos, DUMMY_SP, Span};
    use swc_core::ecma::ast::{BinExpr, BinaryOp, Ident};

    fn span(lo: u32, hi: u32) -> Span {
        Span::new(BytePos(lo), BytePos(hi), Default::default())
    }

    fn ident(name: &str, lo: u32, hi: u32) -> Box<Expr> {
        Box::new(Expr::Ident(Ident::new(name.into(), span(lo, hi))))
    }

    fn mutant(id: usize, original: NodeKey, replacement: MutantNode) -> Mutant {
        Mutant {
            id,
            file_name: "a.js".to_string(),
            mutator_name: "ArithmeticOperator",
            original,
            replacement,
            range: ByteRange::new(0, 0),
            location: Location::default(),
            replacement_code: String::new(),
            ignore_reason: None,
        }
    }

    fn sum() -> Expr {
        Expr::Bin(BinExpr {
            span: span(1, 6),
            op: BinaryOp::Add,
            left: ident("a", 1, 2),
            right: ident("b", 5, 6),
        })
    }

    #[test]
    fn applied_replaces_the_anchor_itself() {
        let anchor = sum();
        let m = mutant(
            0,
            NodeKey::new(NodeKind::Expression, span(1, 6)),
            Expr::Ident(Ident::new("x".into(), DUMMY_SP)).into(),
        );

        let out = applied(&anchor, &m).expect("should apply");
        assert!(matches!(out, Expr::Ident(ref i) if &*i.sym == "x"));
    }

    #[test]
    fn applied_replaces_a_nested_node() {
        let anchor = sum();
        let m = mutant(
            0,
            NodeKey::new(NodeKind::Expression, span(5, 6)),
            Expr::Ident(Ident::new("c".into(), DUMMY_SP)).into(),
        );

        let out = applied(&anchor, &m).expect("should apply");
        let Expr::Bin(bin) = out else {
            panic!("expected a binary expression");
        };
        assert!(matches!(&*bin.right, Expr::Ident(i) if &*i.sym == "c"));
        assert!(matches!(&*bin.left, Expr::Ident(i) if &*i.sym == "a"));
    }

    #[test]
    fn applied_fails_when_the_original_is_elsewhere() {
        let anchor = sum();
        let m = mutant(
            4,
            NodeKey::new(NodeKind::Expression, span(10, 12)),
            Expr::Ident(Ident::new("c".into(), DUMMY_SP)).into(),
        );

        let err = applied(&anchor, &m).expect_err("should fail");
        assert!(err.contains("mutant 4"));
    }

    #[test]
    fn chain_order_and_names() {
        let names: Vec<&str> = Placer::CHAIN.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec![
                "expressionMutantPlacer",
                "statementMutantPlacer",
                "switchCaseMutantPlacer"
            ]
        );
    }
}
