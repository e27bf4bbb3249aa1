use swc_core::common::Spanned;
use swc_core::ecma::ast::{ArrowExpr, BlockStmtOrExpr, Expr, Ident};

use super::{MutantNode, NodeContext, NodeRef};

pub fn mutate(node: NodeRef<'_>, _ctx: &NodeContext) -> Vec<MutantNode> {
    let NodeRef::Expr(Expr::Arrow(arrow)) = node else {
        return Vec::new();
    };

    let body: &BlockStmtOrExpr = &arrow.body;
    let BlockStmtOrExpr::Expr(body) = body else {
        return Vec::new();
    };

    if matches!(&**body, Expr::Ident(ident) if &*ident.sym == "undefined") {
        return Vec::new();
    }

    let mut replacement: ArrowExpr = arrow.clone();
    replacement.params = Vec::new();
    replacement.type_params = None;
    replacement.return_type = None;
    replacement.body = BlockStmtOrExpr::Expr(Box::new(Expr::Ident(Ident::new(
        "undefined".into(),
        body.span(),
    ))))
    .into();

    vec![Expr::Arrow(replacement).into()]
}

#[cfg(test)]
mod tests {
    use crate::test_support::mutations;

    #[test]
    fn expression_bodies_return_undefined() {
        let found: Vec<String> = mutations("ArrowFunction", "const f = (a: number) => a * 2;")
            .into_iter()
            .map(|code| code.replace(' ', ""))
            .collect();
        assert_eq!(found, vec!["()=>undefined"]);
    }

    #[test]
    fn block_bodies_and_undefined_are_left_alone() {
        assert!(mutations("ArrowFunction", "const f = () => { return 1; };").is_empty());
        assert!(mutations("ArrowFunction", "const g = () => undefined;").is_empty());
    }
}
