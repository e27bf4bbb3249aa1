use swc_core::ecma::ast::{Expr, UpdateExpr, UpdateOp};

use super::{MutantNode, NodeContext, NodeRef};

pub fn mutate(node: NodeRef<'_>, _ctx: &NodeContext) -> Vec<MutantNode> {
    let NodeRef::Expr(Expr::Update(update)) = node else {
        return Vec::new();
    };

    let op = match update.op {
        UpdateOp::PlusPlus => UpdateOp::MinusMinus,
        UpdateOp::MinusMinus => UpdateOp::PlusPlus,
    };

    vec![
        Expr::Update(UpdateExpr {
            op,
            ..update.clone()
        })
        .into(),
    ]
}
