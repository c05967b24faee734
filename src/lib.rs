pub mod ast;
pub mod functions;

use ast::{Env, Error, Expr, ParseError, Parser};
use std::collections::HashSet;

pub use ast::{format_number, Evaluator};

/// Parses a formula into a tree without validating function names or arities.
pub fn parse(expression: &str) -> Result<Expr, ParseError> {
    Parser::parse_expression(expression)
}

/// Parses, checks and evaluates `expression` against `env`.
pub fn evaluate_expression(expression: &str, env: &Env) -> Result<f64, Error> {
    let ast = Parser::parse_expression(expression)?;
    ast.check(&mut HashSet::new())?;
    Ok(ast.eval(env))
}
