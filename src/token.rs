//! Lexical units shared with the external lexer, parser and writer.
//!
//! A [`Token`] pairs two classifications with its literal text:
//!
//! - [`LexKind`]: what the lexer saw (identifier, operator, whitespace, ...)
//! - [`TokenKind`]: what the grammar made of it (type name, field name, value, ...)
//!
//! Persisted text is the concatenation of token data in order, see [`write_tokens`].
//!
//! ```rust
//! use xcl::{write_tokens, LexKind, Token, TokenKind};
//!
//! let tokens = vec![
//!     Token::new(LexKind::Identifier, TokenKind::FieldName, "Port"),
//!     Token::space(" "),
//!     Token::operator(TokenKind::SetOperator, "="),
//!     Token::space(" "),
//!     Token::new(LexKind::Identifier, TokenKind::Value, "8080"),
//! ];
//! assert_eq!(write_tokens(&tokens), "Port = 8080");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LexKind {
    Identifier,
    String,
    Operator,
    Space,
    NewLine,
    Comment,
}

/// Grammar-level role of a token inside a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    TypeName,
    FieldName,
    ParameterStart,
    SectionStart,
    SectionEnd,
    SetOperator,
    Value,
    /// Whitespace, newlines and comments
    Meaningless,
}

/// An immutable lexical unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    lex: LexKind,
    kind: TokenKind,
    data: String,
}

impl Token {
    #[must_use]
    pub fn new(lex: LexKind, kind: TokenKind, data: impl Into<String>) -> Self {
        Token {
            lex,
            kind,
            data: data.into(),
        }
    }

    /// Whitespace that carries no meaning.
    #[must_use]
    pub fn space(data: impl Into<String>) -> Self {
        Token::new(LexKind::Space, TokenKind::Meaningless, data)
    }

    #[must_use]
    pub fn newline() -> Self {
        Token::new(LexKind::NewLine, TokenKind::Meaningless, "\n")
    }

    #[must_use]
    pub fn operator(kind: TokenKind, data: impl Into<String>) -> Self {
        Token::new(LexKind::Operator, kind, data)
    }

    #[inline]
    #[must_use]
    pub fn lex(&self) -> LexKind {
        self.lex
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The literal text of this token.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    #[must_use]
    pub fn is_field_name(&self) -> bool {
        self.kind == TokenKind::FieldName
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

/// A parsed unit: the resolved name used for value conversion plus the
/// token it came from.
///
/// For most literals the name equals the token text. Quoted strings differ:
/// the token keeps the quotes and escapes, the name is the unescaped content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    name: String,
    token: Token,
}

impl Symbol {
    /// Creates a symbol whose name is its token text.
    #[must_use]
    pub fn new(lex: LexKind, kind: TokenKind, data: impl Into<String>) -> Self {
        let token = Token::new(lex, kind, data);
        Symbol {
            name: token.data.clone(),
            token,
        }
    }

    #[must_use]
    pub fn with_name(name: impl Into<String>, token: Token) -> Self {
        Symbol {
            name: name.into(),
            token,
        }
    }

    /// Shorthand for an identifier value literal such as `8080` or `true`.
    #[must_use]
    pub fn value(data: impl Into<String>) -> Self {
        Symbol::new(LexKind::Identifier, TokenKind::Value, data)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn token(&self) -> &Token {
        &self.token
    }

    #[must_use]
    pub fn into_token(self) -> Token {
        self.token
    }
}

/// Concatenates the literal text of `tokens` in order.
pub fn write_tokens<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a Token>,
{
    let mut output = String::new();
    for token in tokens {
        output.push_str(token.data());
    }
    output
}
