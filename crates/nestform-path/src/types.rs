//! Type definitions for path expressions.

use std::fmt;
use std::str::FromStr;

use crate::parse::{format, parse};
use crate::PathError;

/// A single step in a parsed path expression.
///
/// `contacts[0].phone` parses to `Key("contacts")`, `Index(0)`, `Key("phone")`.
/// A key immediately followed by an index addresses an element of the array
/// stored under that key; an index with no key in front of it (`[0]` or the
/// second group of `a[0][1]`) addresses an element of the array produced by
/// the preceding tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Object property name.
    Key(String),
    /// Array element position.
    Index(usize),
    /// `[]` - every element of the array denoted by the preceding tokens.
    Wildcard,
}

impl Token {
    /// Returns true for [`Token::Index`] and [`Token::Wildcard`].
    pub fn is_element(&self) -> bool {
        matches!(self, Token::Index(_) | Token::Wildcard)
    }

    /// Returns the key name if this is a [`Token::Key`].
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Token::Key(key) => Some(key),
            _ => None,
        }
    }
}

/// A parsed path expression that remembers its source text.
///
/// Parsing is total, so `Path` can be built from any string. Use
/// [`Path::parse_strict`] when empty segments should be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    source: String,
    tokens: Vec<Token>,
}

impl Path {
    /// Parses `source` leniently.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let tokens = parse(&source);
        Self { source, tokens }
    }

    /// Parses `source`, rejecting empty paths and empty segments.
    ///
    /// # Errors
    ///
    /// - `PathError::Empty` - `source` is the empty string
    /// - `PathError::EmptySegment` - two separators are adjacent, or the path
    ///   starts or ends with `.`
    pub fn parse_strict(source: &str) -> Result<Self, PathError> {
        if source.is_empty() {
            return Err(PathError::Empty);
        }
        if let Some(position) = source.split('.').position(str::is_empty) {
            return Err(PathError::EmptySegment(position));
        }
        Ok(Self::new(source))
    }

    /// Builds a path from tokens, formatting the canonical source text.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            source: format(&tokens),
            tokens,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// True if any token is a [`Token::Wildcard`].
    pub fn has_wildcard(&self) -> bool {
        self.tokens.iter().any(|t| matches!(t, Token::Wildcard))
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::new(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::new(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::new(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
