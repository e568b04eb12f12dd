//! Tokenization of command strings.
//!
//! A command is split on runs of whitespace. Each word is classified as either
//! a non-negative integer literal or one of the operator keywords. Keywords are
//! case-sensitive.

use std::fmt;
use std::str::SplitWhitespace;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::value::Value;

/// Operators understood by the stack machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// `+`: pop two values, push their sum.
    Add,
    /// `-`: pop two values, push top minus second-from-top.
    Subtract,
    /// `*`: pop two values, push their product.
    Multiply,
    /// `DUP`: push a copy of the top value.
    Dup,
    /// `SUM`: replace the whole stack with its total.
    Sum,
    /// `CLEAR`: remove every value.
    Clear,
}

impl Operator {
    /// Every operator, in keyword listing order.
    pub const ALL: [Operator; 6] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Dup,
        Operator::Sum,
        Operator::Clear,
    ];

    /// The keyword that spells this operator in a command.
    pub const fn keyword(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Dup => "DUP",
            Operator::Sum => "SUM",
            Operator::Clear => "CLEAR",
        }
    }

    /// Look up an operator by its exact keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.keyword() == word)
    }

    /// Minimum stack depth the operator needs before it can run.
    pub const fn arity(self) -> usize {
        match self {
            Operator::Add | Operator::Subtract | Operator::Multiply => 2,
            Operator::Dup | Operator::Sum => 1,
            Operator::Clear => 0,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A classified word of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// An in-range integer literal.
    Literal(Value),
    /// An operator keyword.
    Operator(Operator),
}

impl Token {
    /// Classify a single word.
    ///
    /// `position` is the 1-based index of the word within its command and is
    /// only used to build error messages.
    ///
    /// A word made only of ASCII digits is a literal; anything larger than the
    /// upper bound is an overflow even when it does not fit a machine integer.
    /// Signs, decimal points and other notations are not literals.
    pub fn parse(word: &str, position: usize) -> Result<Self> {
        if let Some(op) = Operator::from_keyword(word) {
            return Ok(Token::Operator(op));
        }

        if word.is_empty() || !word.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidCommand {
                token: word.to_string(),
                position,
            });
        }

        word.parse::<u64>()
            .ok()
            .and_then(Value::new)
            .map(Token::Literal)
            .ok_or_else(|| Error::Overflow {
                expression: word.to_string(),
            })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(value) => write!(f, "{}", value),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// One word of a command with its 1-based position and classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub position: usize,
    pub text: &'a str,
    pub token: Result<Token>,
}

/// Lazy iterator over the words of a command, keeping their source text.
#[derive(Debug, Clone)]
pub struct Lexemes<'a> {
    words: SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Iterator for Lexemes<'a> {
    type Item = Lexeme<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.words.next()?;
        self.position += 1;
        Some(Lexeme {
            position: self.position,
            text,
            token: Token::parse(text, self.position),
        })
    }
}

/// Split `command` on whitespace, keeping each word next to its token.
///
/// Blank input yields nothing.
pub fn lexemes(command: &str) -> Lexemes<'_> {
    Lexemes {
        words: command.split_whitespace(),
        position: 0,
    }
}

/// Lazy iterator over the tokens of a command.
///
/// Calling [`tokenize`] again on the same command yields the same sequence.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    lexemes: Lexemes<'a>,
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lexemes.next().map(|lexeme| lexeme.token)
    }
}

/// Split `command` on whitespace and classify each word.
///
/// Blank input yields no tokens.
pub fn tokenize(command: &str) -> Tokens<'_> {
    Tokens {
        lexemes: lexemes(command),
    }
}
