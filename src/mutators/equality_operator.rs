use swc_core::ecma::ast::{BinExpr, BinaryOp, Expr};

use super::{MutantNode, NodeContext, NodeRef};

pub fn mutate(node: NodeRef<'_>, _ctx: &NodeContext) -> Vec<MutantNode> {
    let NodeRef::Expr(Expr::Bin(bin)) = node else {
        return Vec::new();
    };

    replacements(bin.op)
        .iter()
        .map(|&op| {
            Expr::Bin(BinExpr {
                op,
                ..bin.clone()
            })
            .into()
        })
        .collect()
}

fn replacements(op: BinaryOp) -> &'static [BinaryOp] {
    use BinaryOp::*;

    match op {
        Lt => &[LtEq, GtEq],
        LtEq => &[Lt, Gt],
        Gt => &[GtEq, LtEq],
        GtEq => &[Gt, Lt],
        EqEq => &[NotEq],
        NotEq => &[EqEq],
        EqEqEq => &[NotEqEq],
        NotEqEq => &[EqEqEq],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::mutations;

    #[test]
    fn relational_operators_get_boundary_and_negated_forms() {
        assert_eq!(mutations("EqualityOperator", "a < b;"), vec!["a <= b", "a >= b"]);
        assert_eq!(mutations("EqualityOperator", "a <= b;"), vec!["a < b", "a > b"]);
        assert_eq!(mutations("EqualityOperator", "a > b;"), vec!["a >= b", "a <= b"]);
        assert_eq!(mutations("EqualityOperator", "a >= b;"), vec!["a > b", "a < b"]);
    }

    #[test]
    fn equality_operators_are_negated() {
        assert_eq!(mutations("EqualityOperator", "a == b;"), vec!["a != b"]);
        assert_eq!(mutations("EqualityOperator", "a != b;"), vec!["a == b"]);
        assert_eq!(mutations("EqualityOperator", "a === b;"), vec!["a !== b"]);
        assert_eq!(mutations("EqualityOperator", "a !== b;"), vec!["a === b"]);
    }

    #[test]
    fn ignores_other_operators() {
        assert!(mutations("EqualityOperator", "a + b; a in b; a instanceof B;").is_empty());
    }
}
