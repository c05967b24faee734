use std::collections::HashMap;

mod checker;
mod display;
mod error;
mod evaluator;
mod lexer;
mod parser;

pub use display::format_number;
pub use error::*;
pub use evaluator::Evaluator;
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use parser::FormulaParser as Parser;

/// Variable assignment consulted during evaluation.
pub type Env = HashMap<String, f64>;

/// A parsed formula.
///
/// Trees are built once by the parser and never mutated afterwards. Operator
/// symbols are kept as written so that [`Expr::check`] can reject trees built
/// by hand with symbols the language does not know.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(f64),
    Variable(String),
    Unary {
        operator: char,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: char,
        right: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn literal(value: f64) -> Self {
        Expr::Literal(value)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn unary(operator: char, operand: Expr) -> Self {
        Expr::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Expr, operator: char, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            args,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

impl UnaryOperator {
    pub fn apply(&self, operand: f64) -> f64 {
        match self {
            UnaryOperator::Plus => operand,
            UnaryOperator::Minus => -operand,
        }
    }
}

impl TryFrom<char> for UnaryOperator {
    type Error = CheckError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(UnaryOperator::Plus),
            '-' => Ok(UnaryOperator::Minus),
            _ => Err(CheckError::UnknownUnaryOperator(value)),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Precedence of the additive level, the loosest binding one.
pub const LOWEST_PRECEDENCE: u8 = 1;

impl Operator {
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => LOWEST_PRECEDENCE,
            Operator::Multiply | Operator::Divide => LOWEST_PRECEDENCE + 1,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = CheckError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            _ => Err(CheckError::UnknownBinaryOperator(value)),
        }
    }
}

/// Binding strength of a binary operator symbol; 0 for unknown symbols.
pub fn precedence(operator: char) -> u8 {
    Operator::try_from(operator).map_or(0, |op| op.precedence())
}
