//! The catalog of mutation operators.
//!
//! Every mutator is a pure function of a node and the position it sits in.
//! All of them are offered every node of the walk; most only react to one
//! expression shape.

mod arithmetic_operator;
mod array_declaration;
mod arrow_function;
mod assignment_operator;
mod block_statement;
mod boolean_literal;
mod conditional_expression;
mod context;
mod equality_operator;
mod logical_operator;
mod method_expression;
mod object_literal;
mod string_literal;
mod unary_operator;
mod update_operator;

use std::fmt;

pub use context::{BlockSlot, ExprSlot, NodeContext, NodeRef, StmtSlot};

use crate::mutant::MutantNode;

/// A mutation operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mutator {
    ArithmeticOperator,
    ArrayDeclaration,
    ArrowFunction,
    AssignmentOperator,
    BlockStatement,
    BooleanLiteral,
    ConditionalExpression,
    EqualityOperator,
    LogicalOperator,
    MethodExpression,
    ObjectLiteral,
    StringLiteral,
    UnaryOperator,
    UpdateOperator,
}

impl Mutator {
    pub const ALL: [Mutator; 14] = [
        Self::ArithmeticOperator,
        Self::ArrayDeclaration,
        Self::ArrowFunction,
        Self::AssignmentOperator,
        Self::BlockStatement,
        Self::BooleanLiteral,
        Self::ConditionalExpression,
        Self::EqualityOperator,
        Self::LogicalOperator,
        Self::MethodExpression,
        Self::ObjectLiteral,
        Self::StringLiteral,
        Self::UnaryOperator,
        Self::UpdateOperator,
    ];

    /// Name used in reports and in `excludedMutations`.
    pub fn name(self) -> &'static str {
        match self {
            Self::ArithmeticOperator => "ArithmeticOperator",
            Self::ArrayDeclaration => "ArrayDeclaration",
            Self::ArrowFunction => "ArrowFunction",
            Self::AssignmentOperator => "AssignmentOperator",
            Self::BlockStatement => "BlockStatement",
            Self::BooleanLiteral => "BooleanLiteral",
            Self::ConditionalExpression => "ConditionalExpression",
            Self::EqualityOperator => "EqualityOperator",
            Self::LogicalOperator => "LogicalOperator",
            Self::MethodExpression => "MethodExpression",
            Self::ObjectLiteral => "ObjectLiteral",
            Self::StringLiteral => "StringLiteral",
            Self::UnaryOperator => "UnaryOperator",
            Self::UpdateOperator => "UpdateOperator",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            Self::ArithmeticOperator => "swaps + - * / % (string concatenation excluded)",
            Self::ArrayDeclaration => "empties array literals and Array() calls, fills empty ones",
            Self::ArrowFunction => "makes expression-bodied arrows return undefined",
            Self::AssignmentOperator => "swaps compound assignments such as += and -=",
            Self::BlockStatement => "empties non-empty blocks",
            Self::BooleanLiteral => "flips true/false and removes logical not",
            Self::ConditionalExpression => "forces conditions to true or false",
            Self::EqualityOperator => "shifts comparison boundaries and negates equality",
            Self::LogicalOperator => "swaps && || ??",
            Self::MethodExpression => "swaps paired methods such as map/forEach",
            Self::ObjectLiteral => "empties object literals",
            Self::StringLiteral => "empties strings and templates, fills empty ones",
            Self::UnaryOperator => "swaps unary + and -, removes ~",
            Self::UpdateOperator => "swaps ++ and --",
        }
    }

    /// Replacements for `node`, in a fixed order.
    pub fn mutate(self, node: NodeRef<'_>, ctx: &NodeContext) -> Vec<MutantNode> {
        match self {
            Self::ArithmeticOperator => arithmetic_operator::mutate(node, ctx),
            Self::ArrayDeclaration => array_declaration::mutate(node, ctx),
            Self::ArrowFunction => arrow_function::mutate(node, ctx),
            Self::AssignmentOperator => assignment_operator::mutate(node, ctx),
            Self::BlockStatement => block_statement::mutate(node, ctx),
            Self::BooleanLiteral => boolean_literal::mutate(node, ctx),
            Self::ConditionalExpression => conditional_expression::mutate(node, ctx),
            Self::EqualityOperator => equality_operator::mutate(node, ctx),
            Self::LogicalOperator => logical_operator::mutate(node, ctx),
            Self::MethodExpression => method_expression::mutate(node, ctx),
            Self::ObjectLiteral => object_literal::mutate(node, ctx),
            Self::StringLiteral => string_literal::mutate(node, ctx),
            Self::UnaryOperator => unary_operator::mutate(node, ctx),
            Self::UpdateOperator => update_operator::mutate(node, ctx),
        }
    }
}

impl fmt::Display for Mutator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run every mutator against `node`.
pub fn mutate_all(node: NodeRef<'_>, ctx: &NodeContext) -> Vec<(Mutator, MutantNode)> {
    Mutator::ALL
        .into_iter()
        .flat_map(|mutator| {
            mutator
                .mutate(node, ctx)
                .into_iter()
                .map(move |replacement| (mutator, replacement))
        })
        .collect()
}
