use swc_core::ecma::ast::{Expr, ObjectLit};

use super::{MutantNode, NodeContext, NodeRef};

pub fn mutate(node: NodeRef<'_>, _ctx: &NodeContext) -> Vec<MutantNode> {
    match node {
        NodeRef::Expr(Expr::Object(object)) if !object.props.is_empty() => vec![
            Expr::Object(ObjectLit {
                span: object.span,
                props: Vec::new(),
            })
            .into(),
        ],
        _ => Vec::new(),
    }
}
