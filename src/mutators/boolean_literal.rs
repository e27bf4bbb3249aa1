use swc_core::ecma::ast::{Bool, Expr, Lit, UnaryOp};

use super::{MutantNode, NodeContext, NodeRef};

pub fn mutate(node: NodeRef<'_>, _ctx: &NodeContext) -> Vec<MutantNode> {
    let NodeRef::Expr(expr) = node else {
        return Vec::new();
    };

    match expr {
        Expr::Lit(Lit::Bool(b)) => vec![
            Expr::Lit(Lit::Bool(Bool {
                span: b.span,
                value: !b.value,
            }))
            .into(),
        ],
        Expr::Unary(unary) if unary.op == UnaryOp::Bang => vec![(*unary.arg).clone().into()],
        _ => Vec::new(),
    }
}
