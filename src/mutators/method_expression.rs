use swc_core::ecma::ast::{CallExpr, Callee, Expr, Ident, MemberExpr, MemberProp, OptCall};
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

use super::{MutantNode, NodeContext, NodeRef};

const SWAPS: &[(&str, &str)] = &[
    ("map", "forEach"),
    ("filter", "reduce"),
    ("some", "every"),
    ("from", "assign"),
    ("slice", "split"),
];

pub fn mutate(node: NodeRef<'_>, _ctx: &NodeContext) -> Vec<MutantNode> {
    let call = match node {
        NodeRef::Expr(Expr::Call(call)) => call,
        NodeRef::Expr(chain @ Expr::OptChain(_)) => return mutate_optional_call(chain),
        _ => return Vec::new(),
    };

    let Callee::Expr(callee) = &call.callee else {
        return Vec::new();
    };

    let Expr::Member(member) = &**callee else {
        return Vec::new();
    };

    let MemberProp::Ident(method) = &member.prop else {
        return Vec::new();
    };

    let Some(swapped) = swapped_name(&method.sym) else {
        return Vec::new();
    };

    let callee = Expr::Member(MemberExpr {
        prop: MemberProp::Ident(Ident::new(swapped.into(), method.span)),
        ..member.clone()
    });

    vec![
        Expr::Call(CallExpr {
            callee: Callee::Expr(Box::new(callee)),
            ..call.clone()
        })
        .into(),
    ]
}

/// `xs?.map(f)` and `xs.map?.(f)`.
fn mutate_optional_call(chain: &Expr) -> Vec<MutantNode> {
    let mut replacement = chain.clone();
    let mut swap = SwapOptionalCall::default();
    replacement.visit_mut_with(&mut swap);

    if swap.swapped {
        vec![replacement.into()]
    } else {
        Vec::new()
    }
}

/// Renames the method of the outermost call in an optional chain.
#[derive(Default)]
struct SwapOptionalCall {
    in_callee: bool,
    swapped: bool,
}

impl VisitMut for SwapOptionalCall {
    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if matches!(expr, Expr::OptChain(_) | Expr::Member(_)) {
            expr.visit_mut_children_with(self);
        }
    }

    fn visit_mut_opt_call(&mut self, call: &mut OptCall) {
        if self.in_callee || self.swapped {
            return;
        }

        // Arguments are mutated as nodes of their own.
        self.in_callee = true;
        call.callee.visit_mut_with(self);
        self.in_callee = false;
    }

    fn visit_mut_member_expr(&mut self, member: &mut MemberExpr) {
        if !self.in_callee || self.swapped {
            return;
        }

        if let MemberProp::Ident(method) = &mut member.prop {
            if let Some(name) = swapped_name(&method.sym) {
                method.sym = name.into();
                self.swapped = true;
            }
        }
    }
}

fn swapped_name(name: &str) -> Option<&'static str> {
    SWAPS.iter().find_map(|&(a, b)| match name {
        n if n == a => Some(b),
        n if n == b => Some(a),
        _ => None,
    })
}
