//! Abstract syntax tree node types.
//!
//! A closed set of tagged variants, immutable once built. Parsers and the
//! evaluator dispatch on the tag.

#[derive(Debug, Clone)]
pub struct Program {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct IfArm {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct MatchCase {
    pub value: Expr,
    pub body: Box<Stmt>,
}

/// A function declaration: name, positional parameter names, and body.
///
/// Lives both as a `Stmt::FuncDecl` node and, post-registration, as the
/// payload stored in the process-scoped function table (see `eval.rs`).
#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    VarDecl {
        name: String,
        init: Option<Expr>,
    },
    ConstDecl {
        name: String,
        init: Option<Expr>,
    },
    FuncDecl(FuncDecl),
    If {
        condition: Expr,
        body: Vec<Stmt>,
        elseifs: Vec<IfArm>,
        else_body: Option<Vec<Stmt>>,
    },
    ForLoop {
        var: String,
        start: Expr,
        end: Expr,
        step: Expr,
        body: Vec<Stmt>,
    },
    WhileLoop {
        condition: Expr,
        body: Vec<Stmt>,
    },
    DoWhileLoop {
        body: Vec<Stmt>,
        condition: Expr,
    },
    Match {
        scrutinee: Expr,
        cases: Vec<MatchCase>,
        else_body: Option<Box<Stmt>>,
    },
    Return(Expr),
    Break,
    Skip,
    Include {
        path: String,
    },
    Log {
        expr: Expr,
    },
    Logln {
        expr: Expr,
    },
    Input {
        target: Expr,
        message: Option<Expr>,
    },
    Expression(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Both,
    Any,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    BitNot,
    Invert,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOperator {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Number(String),
    Str(String),
    Identifier(String),
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    Assignment {
        target: Box<Expr>,
        op: AssignOperator,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    MemberAccess {
        object: Box<Expr>,
        property: String,
    },
    ArrayLiteral(Vec<Expr>),
}
