use swc_core::ecma::ast::{BlockStmt, Callee, Expr, Stmt};

use super::{BlockSlot, MutantNode, NodeContext, NodeRef};

pub fn mutate(node: NodeRef<'_>, ctx: &NodeContext) -> Vec<MutantNode> {
    let NodeRef::Block(block) = node else {
        return Vec::new();
    };

    if block.stmts.is_empty() || is_guarded_constructor_body(block, ctx.block_slot) {
        return Vec::new();
    }

    vec![MutantNode::Block(BlockStmt {
        span: block.span,
        stmts: Vec::new(),
    })]
}

/// A constructor that relies on parameter properties or initialized fields
/// must keep its leading `super(...)` call.
fn is_guarded_constructor_body(block: &BlockStmt, slot: BlockSlot) -> bool {
    let BlockSlot::ConstructorBody {
        has_param_props,
        has_initialized_props,
    } = slot
    else {
        return false;
    };

    (has_param_props || has_initialized_props) && starts_with_super_call(block)
}

fn starts_with_super_call(block: &BlockStmt) -> bool {
    match block.stmts.first() {
        Some(Stmt::Expr(stmt)) => matches!(
            &*stmt.expr,
            Expr::Call(call) if matches!(call.callee, Callee::Super(_))
        ),
        _ => false,
    }
}
