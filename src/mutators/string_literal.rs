use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{Expr, Lit, Str, Tpl, TplElement};

use super::{ExprSlot, MutantNode, NodeContext, NodeRef};

const PLACEHOLDER: &str = "Stryker was here!";

pub fn mutate(node: NodeRef<'_>, ctx: &NodeContext) -> Vec<MutantNode> {
    let NodeRef::Expr(expr) = node else {
        return Vec::new();
    };

    // Directives, `require("x")` and `import("x")` keep their meaning only
    // with the exact literal. A key cannot host a conditional.
    if matches!(
        ctx.expr_slot,
        ExprSlot::Directive | ExprSlot::ModuleSpecifier | ExprSlot::ObjectKey
    ) {
        return Vec::new();
    }

    let replacement = match expr {
        Expr::Lit(Lit::Str(s)) => Expr::Lit(Lit::Str(Str {
            span: s.span,
            value: if s.value.is_empty() { PLACEHOLDER } else { "" }.into(),
            raw: None,
        })),
        Expr::Tpl(tpl) => {
            let is_empty = tpl.exprs.is_empty()
                && tpl.quasis.len() == 1
                && tpl.quasis[0].raw.is_empty();
            template(tpl, if is_empty { PLACEHOLDER } else { "" })
        }
        _ => return Vec::new(),
    };

    vec![replacement.into()]
}

fn template(original: &Tpl, text: &str) -> Expr {
    Expr::Tpl(Tpl {
        span: original.span,
        exprs: Vec::new(),
        quasis: vec![TplElement {
            span: DUMMY_SP,
            tail: true,
            cooked: Some(text.into()),
            raw: text.into(),
        }],
    })
}

#[cfg(test)]
mod tests {
    use crate::instrument;
    use crate::options::InstrumenterOptions;
    use crate::source::File;
    use crate::test_support::mutations;

    #[test]
    fn strings_are_emptied_or_filled() {
        assert_eq!(mutations("StringLiteral", "const s = 'abc';"), vec![r#""""#]);
        assert_eq!(
            mutations("StringLiteral", "const s = \"\";"),
            vec![r#""Stryker was here!""#]
        );
    }

    #[test]
    fn templates_are_emptied_or_filled() {
        assert_eq!(mutations("StringLiteral", "const s = `a${b}c`;"), vec!["``"]);
        assert_eq!(
            mutations("StringLiteral", "const s = ``;"),
            vec!["`Stryker was here!`"]
        );
    }

    #[test]
    fn skips_positions_where_the_literal_is_structural() {
        let code = r#"
            'use strict';
            import a from 'a';
            export { b } from 'b';
            const c = require('c');
            const d = import('d');
            const o = { 'key': 1 };
            type T = 'literal';
            tag`quasi`;
        "#;
        assert!(mutations("StringLiteral", code).is_empty());
    }

    #[test]
    fn computed_keys_are_left_alone() {
        assert!(mutations("StringLiteral", "const o = { ['a']: 1 };").is_empty());
        assert!(mutations("StringLiteral", "class A { ['m']() {} }").is_empty());
    }

    #[test]
    fn classes_with_string_keys_still_instrument() {
        let files = [File::new("k.ts", "export class A {\n  ['run']() { return 1; }\n}\n")];
        let result = instrument(&files, &InstrumenterOptions::default()).expect("valid options");

        assert!(result.failures.is_empty(), "{:?}", result.failures);
        assert_eq!(result.files.len(), 1);
        assert!(result.mutants.iter().all(|m| m.mutator_name != "StringLiteral"));
    }

    #[test]
    fn only_the_prologue_is_a_directive() {
        assert_eq!(
            mutations("StringLiteral", "function f() { g(); 'abc'; }"),
            vec![r#""""#]
        );
        assert!(mutations("StringLiteral", "function f() { 'use strict'; g(); }").is_empty());
        assert!(mutations("StringLiteral", "const f = () => { 'use asm'; };").is_empty());
        assert_eq!(
            mutations("StringLiteral", "'use strict';\ng();\n'late';"),
            vec![r#""""#]
        );
    }

    #[test]
    fn jsx_attribute_strings_are_skipped() {
        let found = crate::test_support::mutations_in(
            "view.jsx",
            "StringLiteral",
            r#"const el = <a href="x">{"y"}</a>;"#,
        );
        assert_eq!(found, vec![r#""""#]);
    }
}
