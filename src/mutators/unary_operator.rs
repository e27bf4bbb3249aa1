use swc_core::ecma::ast::{Expr, UnaryExpr, UnaryOp};

use super::{MutantNode, NodeContext, NodeRef};

pub fn mutate(node: NodeRef<'_>, _ctx: &NodeContext) -> Vec<MutantNode> {
    let NodeRef::Expr(Expr::Unary(unary)) = node else {
        return Vec::new();
    };

    let replacement = match unary.op {
        UnaryOp::Plus => Expr::Unary(UnaryExpr {
            op: UnaryOp::Minus,
            ..unary.clone()
        }),
        UnaryOp::Minus => Expr::Unary(UnaryExpr {
            op: UnaryOp::Plus,
            ..unary.clone()
        }),
        UnaryOp::Tilde => (*unary.arg).clone(),
        _ => return Vec::new(),
    };

    vec![replacement.into()]
}

#[cfg(test)]
mod tests {
    use crate::test_support::mutations;

    #[test]
    fn flips_signs() {
        assert_eq!(mutations("UnaryOperator", "+a;"), vec!["-a"]);
        assert_eq!(mutations("UnaryOperator", "-a;"), vec!["+a"]);
    }

    #[test]
    fn drops_bitwise_not() {
        assert_eq!(mutations("UnaryOperator", "~a;"), vec!["a"]);
    }

    #[test]
    fn leaves_other_unary_operators() {
        assert!(mutations("UnaryOperator", "!a; typeof a; void a; delete a.b;").is_empty());
    }
}
