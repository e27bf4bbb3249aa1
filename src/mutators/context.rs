use swc_core::ecma::ast::{BlockStmt, Expr, Ident, Stmt, SwitchCase};

/// A node offered to the mutators.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Expr(&'a Expr),
    Stmt(&'a Stmt),
    Block(&'a BlockStmt),
    Case(&'a SwitchCase),
}

/// Position of an expression inside its parent.
///
/// Decides both which mutations make sense for the expression and whether
/// (and how) a conditional can be spliced in its place.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ExprSlot {
    /// Any position where a conditional must be parenthesized.
    #[default]
    Operand,

    /// Test of `while`, `do ... while` or `for`.
    LoopTest,

    /// Test of an `if` statement.
    IfTest,

    /// Test of a conditional expression.
    CondTest,

    /// Computed key of an object or class member.
    ObjectKey,

    /// Tag of a tagged template.
    TaggedTemplateTag,

    /// Target of an assignment or update, or the left side of `for in/of`.
    AssignTarget,

    /// First argument of `require()` or `import()`.
    ModuleSpecifier,

    /// Expression of an expression statement.
    ExprStatement,

    /// String of a directive such as `"use strict"`, at the start of a
    /// script or function body.
    Directive,

    /// Initializer of a variable declarator; carries the bound name.
    VarInit(Option<Ident>),

    /// Value of an object property; carries an identifier key.
    PropValue(Option<Ident>),

    /// Call argument or array element.
    Element,

    /// Argument of `return` or `throw`.
    Return,

    /// Expression body of an arrow function.
    ArrowBody,

    /// Right side of an assignment.
    AssignValue,

    /// Default value of a parameter or pattern.
    DefaultValue,

    /// Consequent or alternate of a conditional expression.
    Branch,

    Paren,
    Sequence,
    Template,
    JsxContainer,
}

impl ExprSlot {
    /// False where a conditional would change the meaning or break the syntax.
    pub fn is_placeable(&self) -> bool {
        !matches!(
            self,
            Self::ObjectKey | Self::TaggedTemplateTag | Self::AssignTarget
        )
    }

    /// True where a bare conditional would bind differently than the
    /// expression it replaces.
    pub fn needs_parens(&self) -> bool {
        matches!(self, Self::Operand | Self::CondTest)
    }

    pub fn is_loop_test(&self) -> bool {
        matches!(self, Self::LoopTest)
    }

    pub fn is_branch_test(&self) -> bool {
        matches!(self, Self::IfTest | Self::CondTest)
    }

    /// Name to give an anonymous function or class placed here.
    pub fn binding_name(&self) -> Option<&Ident> {
        match self {
            Self::VarInit(name) | Self::PropValue(name) => name.as_ref(),
            _ => None,
        }
    }
}

/// Position of a statement inside its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StmtSlot {
    #[default]
    Other,

    /// Body of a labelled statement; `continue label` needs it to stay a loop.
    LabelBody,
}

/// What kind of body a block is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockSlot {
    #[default]
    Other,

    /// Body of a class constructor.
    ConstructorBody {
        /// Some parameter is a TypeScript parameter property (`private x`).
        has_param_props: bool,

        /// The class declares a property with an initializer.
        has_initialized_props: bool,
    },
}

/// Where the node offered to the mutators sits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeContext {
    pub expr_slot: ExprSlot,
    pub block_slot: BlockSlot,
}

impl NodeContext {
    pub fn expr(slot: ExprSlot) -> Self {
        Self {
            expr_slot: slot,
            ..Default::default()
        }
    }

    pub fn block(slot: BlockSlot) -> Self {
        Self {
            block_slot: slot,
            ..Default::default()
        }
    }
}
