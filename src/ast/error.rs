use thiserror::Error;

/// Input that cannot be split into tokens. Positions are byte offsets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// A character that cannot begin any token.
    #[error("unexpected character {found:?} at offset {position}")]
    UnexpectedCharacter { position: usize, found: char },
    /// A numeric literal too large for an `f64`.
    #[error("number {literal} out of range at offset {position}")]
    NumberOutOfRange { position: usize, literal: String },
}

/// A token sequence that does not form a formula.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unexpected {found} at offset {position}, expected {expected}")]
pub struct SyntaxError {
    pub position: usize,
    pub found: String,
    pub expected: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckError {
    #[error("unexpected unary op {0:?}")]
    UnknownUnaryOperator(char),
    #[error("unexpected binary op {0:?}")]
    UnknownBinaryOperator(char),
    #[error("unknown function {0:?}")]
    UnknownFunction(String),
    #[error("call to {name} has {got} args, want {want}")]
    WrongArity {
        name: String,
        got: usize,
        want: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Check(#[from] CheckError),
}

impl From<LexError> for Error {
    fn from(value: LexError) -> Self {
        Error::Parse(value.into())
    }
}

impl From<SyntaxError> for Error {
    fn from(value: SyntaxError) -> Self {
        Error::Parse(value.into())
    }
}
