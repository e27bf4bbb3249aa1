use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{
    ArrowExpr, BindingIdent, BlockStmt, BlockStmtOrExpr, CallExpr, Callee, CondExpr, Decl, Expr,
    Ident, Pat, ReturnStmt, Stmt, VarDecl, VarDeclKind, VarDeclarator,
};

use super::{Anchor, applied_all, ids};
use crate::mutant::Mutant;
use crate::mutators::ExprSlot;
use crate::syntax_helpers::{covered_expression, mutant_test_expression, paren};

pub fn can_place(anchor: &Anchor<'_>) -> bool {
    matches!(anchor, Anchor::Expr { slot, .. } if slot.is_placeable())
}

/// `test(n) ? mutant(n) : ... : (coverage(ids), original)`
pub fn place(anchor: &mut Anchor<'_>, mutants: &[&Mutant]) -> Result<(), String> {
    let Anchor::Expr { expr, slot } = anchor else {
        return Err("not an expression".to_string());
    };

    let applied = applied_all(&**expr, mutants)?;
    let original = name_anonymous((**expr).clone(), slot);

    let mut result = covered_expression(&ids(mutants), original);
    for (id, mutated) in applied {
        result = Expr::Cond(CondExpr {
            span: DUMMY_SP,
            test: Box::new(mutant_test_expression(id)),
            cons: Box::new(branch(mutated)),
            alt: Box::new(result),
        });
    }

    if slot.needs_parens() {
        result = paren(result);
    }

    **expr = result;
    Ok(())
}

/// A sequence would swallow the rest of the conditional.
fn branch(expr: Expr) -> Expr {
    match expr {
        Expr::Seq(_) => paren(expr),
        other => other,
    }
}

/// Keep the name an anonymous function or class would have inferred from
/// its binding, now that it no longer is the binding's direct value.
fn name_anonymous(expr: Expr, slot: &ExprSlot) -> Expr {
    let Some(name) = slot.binding_name() else {
        return expr;
    };
    let name = Ident::new(name.sym.clone(), DUMMY_SP);

    match expr {
        Expr::Fn(mut func) if func.ident.is_none() => {
            func.ident = Some(name);
            Expr::Fn(func)
        }
        Expr::Class(mut class) if class.ident.is_none() => {
            class.ident = Some(name);
            Expr::Class(class)
        }
        Expr::Arrow(arrow) if matches!(slot, ExprSlot::VarInit(_)) => named_arrow(name, arrow),
        other => other,
    }
}

/// `(() => { const name = <arrow>; return name; })()`
fn named_arrow(name: Ident, arrow: ArrowExpr) -> Expr {
    let declaration = Stmt::Decl(Decl::Var(
        VarDecl {
            span: DUMMY_SP,
            kind: VarDeclKind::Const,
            declare: false,
            decls: vec![VarDeclarator {
                span: DUMMY_SP,
                name: Pat::Ident(BindingIdent::from(name.clone())),
                init: Some(Box::new(Expr::Arrow(arrow))),
                definite: false,
            }],
        }
        .into(),
    ));

    let give_back = Stmt::Return(ReturnStmt {
        span: DUMMY_SP,
        arg: Some(Box::new(Expr::Ident(name))),
    });

    let wrapper = Expr::Arrow(ArrowExpr {
        span: DUMMY_SP,
        params: Vec::new(),
        body: BlockStmtOrExpr::BlockStmt(BlockStmt {
            span: DUMMY_SP,
            stmts: vec![declaration, give_back],
        })
        .into(),
        is_async: false,
        is_generator: false,
        type_params: None,
        return_type: None,
    });

    Expr::Call(CallExpr {
        span: DUMMY_SP,
        callee: Callee::Expr(Box::new(paren(wrapper))),
        args: Vec::new(),
        type_args: None,
    })
}
