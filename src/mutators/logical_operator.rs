use swc_core::ecma::ast::{BinExpr, BinaryOp, Expr};

use super::{MutantNode, NodeContext, NodeRef};

pub fn mutate(node: NodeRef<'_>, _ctx: &NodeContext) -> Vec<MutantNode> {
    let NodeRef::Expr(Expr::Bin(bin)) = node else {
        return Vec::new();
    };

    let op = match bin.op {
        BinaryOp::LogicalAnd => BinaryOp::LogicalOr,
        BinaryOp::LogicalOr => BinaryOp::LogicalAnd,
        BinaryOp::NullishCoalescing => BinaryOp::LogicalAnd,
        _ => return Vec::new(),
    };

    vec![
        Expr::Bin(BinExpr {
            op,
            ..bin.clone()
        })
        .into(),
    ]
}
