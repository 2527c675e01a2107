//! AST node model.
//!
//! Nodes are stored in the [`Arena`](crate::arena::Arena) and refer to their
//! children by [`NodeId`] handle; statement sequences are ordered child lists.
//! Operators are closed enumerations whose `Display` renders the source
//! spelling.

use strum::Display;

use crate::arena::{NodeId, StrId};

/// Binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BinaryOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "%")]
    Mod,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = ">=")]
    Ge,
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    Ne,
    #[strum(serialize = "&&")]
    And,
    #[strum(serialize = "||")]
    Or,
}

/// Unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UnaryOp {
    #[strum(serialize = "-")]
    Neg,
    #[strum(serialize = "!")]
    Not,
}

/// An AST node.
///
/// `Program` is the parser's root; `Block` is a braced statement list. The
/// remaining variants carry exactly the fields their construct needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Program(Vec<NodeId>),
    Block(Vec<NodeId>),
    VarDecl {
        name: StrId,
        init: Option<NodeId>,
    },
    FuncDecl {
        name: StrId,
        params: Vec<StrId>,
        body: NodeId,
    },
    /// Assignment expression. The target must evaluate-time resolve to an
    /// identifier; anything else degrades to undefined.
    Assign {
        target: NodeId,
        value: NodeId,
    },
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Call {
        callee: NodeId,
        args: Vec<NodeId>,
    },
    If {
        condition: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    },
    While {
        condition: NodeId,
        body: NodeId,
    },
    /// Reserved. The `for` keyword is scanned but the parser never produces
    /// this variant; the evaluator answers it with undefined.
    For {
        init: Option<NodeId>,
        condition: Option<NodeId>,
        update: Option<NodeId>,
        body: Option<NodeId>,
    },
    Return(Option<NodeId>),
    Number(f64),
    Str(StrId),
    Identifier(StrId),
}
