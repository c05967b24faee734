use crate::ast::LexError;
use log::trace;
use pest::Parser;
use pest_derive::Parser;
use std::fmt;
use std::iter::FusedIterator;

#[derive(Parser)]
#[grammar = "ast/tokens.pest"]
struct TokenGrammar;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(value) => write!(f, "number {}", value),
            TokenKind::Identifier(name) => write!(f, "identifier {:?}", name),
            TokenKind::Plus => f.write_str("'+'"),
            TokenKind::Minus => f.write_str("'-'"),
            TokenKind::Star => f.write_str("'*'"),
            TokenKind::Slash => f.write_str("'/'"),
            TokenKind::LParen => f.write_str("'('"),
            TokenKind::RParen => f.write_str("')'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character of the token
    pub position: usize,
}

/// Splits a formula into tokens, one `token` match of the grammar at a time.
///
/// Yields `Err` once for the first character that cannot begin a token and
/// stops afterwards. The end marker is not yielded; see [`tokenize`].
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    has_failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            has_failed: false,
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.position..];
        self.position += rest.len() - rest.trim_start().len();
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let rest = &self.input[self.position..];
        let Some(first) = rest.chars().next() else {
            return Ok(None);
        };
        let position = self.position;
        let unexpected = || LexError::UnexpectedCharacter {
            position,
            found: first,
        };

        let pair = TokenGrammar::parse(Rule::token, rest)
            .ok()
            .and_then(|mut pairs| pairs.next())
            .and_then(|token| token.into_inner().next())
            .ok_or_else(unexpected)?;

        let text = pair.as_str();
        let kind = match pair.as_rule() {
            Rule::number => {
                let value: f64 = text.parse().map_err(|_| unexpected())?;
                if !value.is_finite() {
                    return Err(LexError::NumberOutOfRange {
                        position,
                        literal: text.to_string(),
                    });
                }
                TokenKind::Number(value)
            }
            Rule::identifier => TokenKind::Identifier(text.to_string()),
            Rule::plus => TokenKind::Plus,
            Rule::minus => TokenKind::Minus,
            Rule::star => TokenKind::Star,
            Rule::slash => TokenKind::Slash,
            Rule::lparen => TokenKind::LParen,
            Rule::rparen => TokenKind::RParen,
            Rule::comma => TokenKind::Comma,
            _ => return Err(unexpected()),
        };

        self.position += text.len();
        let token = Token { kind, position };
        trace!("Lexed token: {:?}", token);
        Ok(Some(token))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_failed {
            return None;
        }

        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.has_failed = true;
                Some(Err(err))
            }
        }
    }
}

impl<'a> FusedIterator for Lexer<'a> {}

/// Lexes the whole input and terminates the stream with an [`TokenKind::Eof`] token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Lexer::new(input).collect::<Result<Vec<_>, _>>()?;
    tokens.push(Token {
        kind: TokenKind::Eof,
        position: input.len(),
    });
    Ok(tokens)
}
