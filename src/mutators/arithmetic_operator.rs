use swc_core::ecma::ast::{BinExpr, BinaryOp, Expr, Lit};

use super::{MutantNode, NodeContext, NodeRef};

pub fn mutate(node: NodeRef<'_>, _ctx: &NodeContext) -> Vec<MutantNode> {
    let NodeRef::Expr(Expr::Bin(bin)) = node else {
        return Vec::new();
    };

    let Some(op) = replacement(bin.op) else {
        return Vec::new();
    };

    if bin.op == BinaryOp::Add && concatenates_strings(bin) {
        return Vec::new();
    }

    vec![
        Expr::Bin(BinExpr {
            op,
            ..bin.clone()
        })
        .into(),
    ]
}

fn replacement(op: BinaryOp) -> Option<BinaryOp> {
    match op {
        BinaryOp::Add => Some(BinaryOp::Sub),
        BinaryOp::Sub => Some(BinaryOp::Add),
        BinaryOp::Mul => Some(BinaryOp::Div),
        BinaryOp::Div => Some(BinaryOp::Mul),
        BinaryOp::Mod => Some(BinaryOp::Mul),
        _ => None,
    }
}

/// A string or template on either side (or right of a nested left `+`) means concatenation.
fn concatenates_strings(bin: &BinExpr) -> bool {
    let left = match &*bin.left {
        Expr::Bin(inner) => &*inner.right,
        other => other,
    };

    is_string_like(left) || is_string_like(&bin.right)
}

fn is_string_like(expr: &Expr) -> bool {
    matches!(expr, Expr::Lit(Lit::Str(_)) | Expr::Tpl(_))
}

#[cfg(test)]
mod tests {
    use crate::test_support::mutations;

    #[test]
    fn swaps_operators() {
        assert_eq!(mutations("ArithmeticOperator", "a + b;"), vec!["a - b"]);
        assert_eq!(mutations("ArithmeticOperator", "a - b;"), vec!["a + b"]);
        assert_eq!(mutations("ArithmeticOperator", "a * b;"), vec!["a / b"]);
        assert_eq!(mutations("ArithmeticOperator", "a / b;"), vec!["a * b"]);
        assert_eq!(mutations("ArithmeticOperator", "a % b;"), vec!["a * b"]);
    }

    #[test]
    fn leaves_string_concatenation_alone() {
        assert!(mutations("ArithmeticOperator", "'a' + b;").is_empty());
        assert!(mutations("ArithmeticOperator", "a + 'b';").is_empty());
        assert!(mutations("ArithmeticOperator", "a + `b${c}`;").is_empty());
        assert!(mutations("ArithmeticOperator", "a + 'b' + c;").is_empty());
        assert_eq!(
            mutations("ArithmeticOperator", "'a' + b + c;"),
            vec!["'a' + b - c"]
        );
    }

    #[test]
    fn ignores_other_operators() {
        assert!(mutations("ArithmeticOperator", "a ** b; a << b; a & b;").is_empty());
    }
}
