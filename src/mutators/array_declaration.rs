use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{ArrayLit, CallExpr, Callee, Expr, ExprOrSpread, Lit, NewExpr, Str};

use super::{MutantNode, NodeContext, NodeRef};

const PLACEHOLDER: &str = "Stryker was here";

pub fn mutate(node: NodeRef<'_>, _ctx: &NodeContext) -> Vec<MutantNode> {
    let NodeRef::Expr(expr) = node else {
        return Vec::new();
    };

    let replacement = match expr {
        Expr::Array(array) => Expr::Array(ArrayLit {
            span: array.span,
            elems: if array.elems.is_empty() {
                vec![Some(placeholder_element())]
            } else {
                Vec::new()
            },
        }),
        Expr::Call(call) if is_array_constructor_callee(&call.callee) => Expr::Call(CallExpr {
            args: constructor_args(call.args.is_empty()),
            ..call.clone()
        }),
        Expr::New(new) if is_array_identifier(&new.callee) => {
            let has_args = new.args.as_ref().is_some_and(|args| !args.is_empty());
            Expr::New(NewExpr {
                args: Some(constructor_args(!has_args)),
                ..new.clone()
            })
        }
        _ => return Vec::new(),
    };

    vec![replacement.into()]
}

// A real span on the new element makes the printer break the array over
// several lines.
fn placeholder_element() -> ExprOrSpread {
    ExprOrSpread {
        spread: None,
        expr: Box::new(Expr::Lit(Lit::Str(Str {
            span: DUMMY_SP,
            value: PLACEHOLDER.into(),
            raw: None,
        }))),
    }
}

/// `Array()` becomes `Array([])`, `Array(a, b)` becomes `Array()`.
fn constructor_args(currently_empty: bool) -> Vec<ExprOrSpread> {
    if !currently_empty {
        return Vec::new();
    }

    vec![ExprOrSpread {
        spread: None,
        expr: Box::new(Expr::Array(ArrayLit {
            span: DUMMY_SP,
            elems: Vec::new(),
        })),
    }]
}

fn is_array_constructor_callee(callee: &Callee) -> bool {
    matches!(callee, Callee::Expr(expr) if is_array_identifier(expr))
}

fn is_array_identifier(expr: &Expr) -> bool {
    matches!(expr, Expr::Ident(ident) if &*ident.sym == "Array")
}
