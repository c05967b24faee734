use crate::ast::{precedence, tokenize, Expr, ParseError, SyntaxError, Token, TokenKind};
use log::debug;

/// Deepest nesting accepted. Signs, parentheses, call arguments and each
/// operator of a chain like `a + b + c` count as one level.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Recursive-descent parser for formulas.
///
/// Binary operators are parsed by precedence climbing over the table in
/// [`precedence`]; unary signs bind tighter than any binary operator.
pub struct FormulaParser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl FormulaParser {
    pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
        debug!("Parsing expression: {}", input);
        let tokens = tokenize(input)?;
        let mut parser = FormulaParser {
            tokens,
            position: 0,
            depth: 0,
        };

        let expr = parser.build_expression()?;
        parser.expect(TokenKind::Eof, "an operator or end of input")?;
        debug!("Parse result: {:?}", expr);
        Ok(expr)
    }

    fn peek(&self) -> &Token {
        // `tokenize` always terminates the stream with Eof, and Eof is never consumed.
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let token = self.peek();
        SyntaxError {
            position: token.position,
            found: token.kind.to_string(),
            expected: expected.to_string(),
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, SyntaxError> {
        if self.peek().kind == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn build_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.build_binary(1)
    }

    /// Parses operators binding at least as tightly as `min_precedence`.
    ///
    /// The right operand is parsed one level tighter, which makes operators of
    /// equal precedence associate to the left. Each operator folded into the
    /// left spine deepens the tree, so it counts as a level of nesting.
    fn build_binary(&mut self, min_precedence: u8) -> Result<Expr, SyntaxError> {
        debug!("Building binary expression at precedence {}", min_precedence);
        let mut node = self.build_unary()?;
        let mut spine = 0;

        while let Some(operator) = binary_operator(&self.peek().kind) {
            let level = precedence(operator);
            if level < min_precedence {
                break;
            }

            self.advance();
            self.depth += 1;
            spine += 1;
            let right = self.build_binary(level + 1)?;
            node = Expr::binary(node, operator, right);
        }

        self.depth -= spine;
        Ok(node)
    }

    /// Every nested sub-expression passes through here, so the depth counter
    /// bounds the recursion of the whole parser.
    fn build_unary(&mut self) -> Result<Expr, SyntaxError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.unexpected(&format!(
                "at most {} levels of nesting",
                MAX_NESTING_DEPTH
            )));
        }

        self.depth += 1;
        let result = self.build_signed();
        self.depth -= 1;
        result
    }

    fn build_signed(&mut self) -> Result<Expr, SyntaxError> {
        let operator = match self.peek().kind {
            TokenKind::Plus => '+',
            TokenKind::Minus => '-',
            _ => return self.build_primary(),
        };

        self.advance();
        debug!("Building unary expression: {}", operator);
        let operand = self.build_unary()?;
        Ok(Expr::unary(operator, operand))
    }

    fn build_primary(&mut self) -> Result<Expr, SyntaxError> {
        debug!("Building primary expression: {:?}", self.peek());
        match self.peek().kind.clone() {
            TokenKind::Number(value) => {
                self.advance();
                Ok(Expr::literal(value))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if self.peek().kind == TokenKind::LParen {
                    self.build_call(name)
                } else {
                    Ok(Expr::variable(name))
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.build_expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            _ => Err(self.unexpected("a number, identifier or '('")),
        }
    }

    fn build_call(&mut self, name: String) -> Result<Expr, SyntaxError> {
        self.expect(TokenKind::LParen, "'('")?;

        let mut args = vec![self.build_expression()?];
        while self.peek().kind == TokenKind::Comma {
            self.advance();
            args.push(self.build_expression()?);
        }
        self.expect(TokenKind::RParen, "',' or ')'")?;

        debug!("Built call to {} with {} args", name, args.len());
        Ok(Expr::call(name, args))
    }
}

fn binary_operator(kind: &TokenKind) -> Option<char> {
    match kind {
        TokenKind::Plus => Some('+'),
        TokenKind::Minus => Some('-'),
        TokenKind::Star => Some('*'),
        TokenKind::Slash => Some('/'),
        _ => None,
    }
}
