use swc_core::ecma::ast::{AssignExpr, AssignOp, Expr, Lit};

use super::{MutantNode, NodeContext, NodeRef};

pub fn mutate(node: NodeRef<'_>, _ctx: &NodeContext) -> Vec<MutantNode> {
    let NodeRef::Expr(Expr::Assign(assign)) = node else {
        return Vec::new();
    };

    let Some(op) = replacement(assign.op) else {
        return Vec::new();
    };

    if assign.op == AssignOp::AddAssign
        && matches!(&*assign.right, Expr::Lit(Lit::Str(_)) | Expr::Tpl(_))
    {
        return Vec::new();
    }

    vec![
        Expr::Assign(AssignExpr {
            op,
            ..assign.clone()
        })
        .into(),
    ]
}

fn replacement(op: AssignOp) -> Option<AssignOp> {
    use AssignOp::*;

    match op {
        AddAssign => Some(SubAssign),
        SubAssign => Some(AddAssign),
        MulAssign => Some(DivAssign),
        DivAssign => Some(MulAssign),
        ModAssign => Some(MulAssign),
        LShiftAssign => Some(RShiftAssign),
        RShiftAssign => Some(LShiftAssign),
        BitAndAssign => Some(BitOrAssign),
        BitOrAssign => Some(BitAndAssign),
        AndAssign => Some(OrAssign),
        OrAssign => Some(AndAssign),
        NullishAssign => Some(AndAssign),
        _ => None,
    }
}
