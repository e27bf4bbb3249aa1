use swc_core::common::Span;
use swc_core::ecma::ast::{BinaryOp, Bool, Expr, ForStmt, Lit, Stmt, SwitchCase};

use super::{MutantNode, NodeContext, NodeRef};

pub fn mutate(node: NodeRef<'_>, ctx: &NodeContext) -> Vec<MutantNode> {
    match node {
        NodeRef::Expr(expr) => mutate_expr(expr, ctx),
        NodeRef::Stmt(Stmt::For(for_stmt)) if for_stmt.test.is_none() => {
            let span = for_stmt.span;
            vec![
                Stmt::For(ForStmt {
                    test: Some(Box::new(boolean(false, span))),
                    ..for_stmt.clone()
                })
                .into(),
            ]
        }
        NodeRef::Case(case) if !case.cons.is_empty() => vec![MutantNode::Case(SwitchCase {
            cons: Vec::new(),
            ..case.clone()
        })],
        _ => Vec::new(),
    }
}

fn mutate_expr(expr: &Expr, ctx: &NodeContext) -> Vec<MutantNode> {
    let span = swc_core::common::Spanned::span(expr);

    // A loop test that always holds would never terminate.
    if ctx.expr_slot.is_loop_test() {
        return vec![boolean(false, span).into()];
    }

    if ctx.expr_slot.is_branch_test() || is_boolean_expression(expr) {
        return vec![boolean(true, span).into(), boolean(false, span).into()];
    }

    Vec::new()
}

fn is_boolean_expression(expr: &Expr) -> bool {
    let Expr::Bin(bin) = expr else {
        return false;
    };

    matches!(
        bin.op,
        BinaryOp::NotEq
            | BinaryOp::NotEqEq
            | BinaryOp::LogicalAnd
            | BinaryOp::LogicalOr
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::EqEq
            | BinaryOp::EqEqEq
            | BinaryOp::Gt
            | BinaryOp::GtEq
    )
}

fn boolean(value: bool, span: Span) -> Expr {
    Expr::Lit(Lit::Bool(Bool { span, value }))
}
