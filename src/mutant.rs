use serde::{Deserialize, Serialize};
use swc_core::common::{BytePos, Span, Spanned};
use swc_core::ecma::ast::{BlockStmt, Expr, Stmt, SwitchCase};

use crate::span::{ByteRange, Location};

/// Syntactic category of a mutated node.
///
/// A replacement always has the same kind as the node it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Expression,
    Statement,

    /// A block that is not itself a statement (function bodies, `try`
    /// blocks, ...), or the block inside a block statement.
    Block,

    SwitchCase,
}

/// Identity of an original node: its kind plus its position in the parsed
/// script.
///
/// Mutants never hold on to the original node itself; the key is enough to
/// find it again under any anchor that contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub kind: NodeKind,
    pub lo: BytePos,
    pub hi: BytePos,
}

impl NodeKey {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            lo: span.lo,
            hi: span.hi,
        }
    }

    pub fn matches(&self, kind: NodeKind, span: Span) -> bool {
        self.kind == kind && self.lo == span.lo && self.hi == span.hi
    }
}

/// A freshly built replacement subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum MutantNode {
    Expr(Box<Expr>),
    Stmt(Box<Stmt>),
    Block(BlockStmt),
    Case(SwitchCase),
}

impl MutantNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Expr(_) => NodeKind::Expression,
            Self::Stmt(_) => NodeKind::Statement,
            Self::Block(_) => NodeKind::Block,
            Self::Case(_) => NodeKind::SwitchCase,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Expr(e) => e.span(),
            Self::Stmt(s) => s.span(),
            Self::Block(b) => b.span,
            Self::Case(c) => c.span,
        }
    }
}

impl From<Expr> for MutantNode {
    fn from(expr: Expr) -> Self {
        Self::Expr(Box::new(expr))
    }
}

impl From<Stmt> for MutantNode {
    fn from(stmt: Stmt) -> Self {
        Self::Stmt(Box::new(stmt))
    }
}

/// A single candidate code replacement.
#[derive(Debug, Clone)]
pub struct Mutant {
    /// Dense, 0-based identifier assigned at registration.
    pub id: usize,

    /// File the mutant belongs to.
    pub file_name: String,

    /// Name of the mutator that produced it (for example `ArithmeticOperator`).
    pub mutator_name: &'static str,

    /// Node being replaced.
    pub original: NodeKey,

    pub replacement: MutantNode,

    /// Byte range of the original node in the file.
    ///
    /// Scope queries and reports use this range for the replacement as well.
    pub range: ByteRange,

    /// Zero-based location of `range`.
    pub location: Location,

    /// Printed form of `replacement`, captured when the mutant was created.
    pub replacement_code: String,

    /// Set when the mutator is excluded; ignored mutants are never placed.
    pub ignore_reason: Option<String>,
}

impl Mutant {
    pub fn is_ignored(&self) -> bool {
        self.ignore_reason.is_some()
    }

    /// Public record of this mutant.
    pub fn to_api_mutant(&self) -> ApiMutant {
        ApiMutant {
            file_name: self.file_name.clone(),
            id: self.id,
            location: self.location,
            mutator_name: self.mutator_name.to_string(),
            range: [self.range.start, self.range.end],
            replacement: self.replacement_code.clone(),
            status: self.ignore_reason.as_ref().map(|_| MutantStatus::Ignored),
            status_reason: self.ignore_reason.clone(),
        }
    }
}

/// Status of a mutant that is known before any test runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MutantStatus {
    Ignored,
}

/// Mutant as handed to reporting and test execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiMutant {
    pub file_name: String,
    pub id: usize,
    pub location: Location,
    pub mutator_name: String,

    /// `[start, end)` byte offsets in the file.
    pub range: [usize; 2],

    pub replacement: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<MutantStatus>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;
    use swc_core::common::DUMMY_SP;
    use swc_core::ecma::ast::Ident;

    fn mutant(ignore_reason: Option<&str>) -> Mutant {
        let span = Span::new(BytePos(13), BytePos(18), Default::default());
        Mutant {
            id: 3,
            file_name: "src/add.js".to_string(),
            mutator_name: "ArithmeticOperator",
            original: NodeKey::new(NodeKind::Expression, span),
            replacement: Expr::Ident(Ident::new("x".into(), DUMMY_SP)).into(),
            range: ByteRange::new(12, 17),
            location: Location {
                start: Position { line: 0, column: 12 },
                end: Position { line: 0, column: 17 },
            },
            replacement_code: "a - b".to_string(),
            ignore_reason: ignore_reason.map(str::to_string),
        }
    }

    #[test]
    fn api_mutant_json_shape() {
        let json = serde_json::to_value(mutant(None).to_api_mutant()).expect("serialize");
        insta::assert_json_snapshot!(json, @r#"
        {
          "fileName": "src/add.js",
          "id": 3,
          "location": {
            "end": {
              "column": 17,
              "line": 0
            },
            "start": {
              "column": 12,
              "line": 0
            }
          },
          "mutatorName": "ArithmeticOperator",
          "range": [
            12,
            17
          ],
          "replacement": "a - b"
        }
        "#);
    }

    #[test]
    fn ignored_mutants_report_status() {
        let api = mutant(Some("Ignored because of excluded mutation \"ArithmeticOperator\""))
            .to_api_mutant();
        assert_eq!(api.status, Some(MutantStatus::Ignored));
        assert_eq!(
            api.status_reason.as_deref(),
            Some("Ignored because of excluded mutation \"ArithmeticOperator\"")
        );
    }

    #[test]
    fn node_key_matches_kind_and_span() {
        let span = Span::new(BytePos(1), BytePos(4), Default::default());
        let key = NodeKey::new(NodeKind::Statement, span);
        assert!(key.matches(NodeKind::Statement, span));
        assert!(!key.matches(NodeKind::Expression, span));
        assert!(!key.matches(NodeKind::Statement, DUMMY_SP));
    }
}
