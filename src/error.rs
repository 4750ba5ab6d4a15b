// ABOUTME: Error types for the Axion lexer, parser, and evaluator

use thiserror::Error;

/// The error kinds the lexer, parser, and evaluator can raise.
///
/// All errors propagate synchronously to the top-level launcher; there is no
/// recovery inside the interpreter itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AxionError {
    /// An unrecognized character in the source text.
    #[error("lex error: {0}")]
    Lex(String),

    /// Unexpected token, missing terminator, unclosed interpolation or string.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// Undefined variable, redeclaration in the same scope, function not found.
    #[error("name error: {0}")]
    Name(String),

    /// Assignment (direct, compound, or indexed) to a const binding.
    #[error("const error: {0}")]
    Const(String),

    /// Non-callable invoked, member access on non-record, index on non-array.
    #[error("type error: {0}")]
    Type(String),

    /// Module not found, constant without initializer, misplaced break/skip/return.
    #[error("runtime error: {0}")]
    Runtime(String),
}
