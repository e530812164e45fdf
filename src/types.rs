//! The value type protocol.
//!
//! A type descriptor converts between lexical symbols and native values. Adding a
//! primitive kind means implementing [`XclType`] for it; nothing else changes.
//!
//! ```rust
//! use xcl::{Error, Native, Result, Symbol, TypeRef, XclType};
//!
//! #[derive(Debug)]
//! struct Percent;
//!
//! impl XclType for Percent {
//!     fn name(&self) -> &str {
//!         "percent"
//!     }
//!
//!     fn parse(&self, symbol: &Symbol) -> Result<Native> {
//!         symbol
//!             .name()
//!             .strip_suffix('%')
//!             .and_then(|n| n.parse::<i64>().ok())
//!             .map(Native::Integer)
//!             .ok_or_else(|| Error::conversion(symbol, "percent", "expected `<n>%`"))
//!     }
//!
//!     fn format(&self, native: &Native) -> String {
//!         match native {
//!             Native::Integer(n) => format!("{}%", n),
//!             other => format!("{:?}", other),
//!         }
//!     }
//!
//!     fn accepts(&self, native: &Native) -> bool {
//!         matches!(native, Native::Integer(_))
//!     }
//!
//!     fn zero(&self) -> Native {
//!         Native::Integer(0)
//!     }
//! }
//!
//! let percent = TypeRef::new(Percent);
//! let value = percent.symbol_to_value(&Symbol::value("75%")).unwrap();
//! assert_eq!(value.as_i64(), Some(75));
//! assert_eq!(percent.value_to_symbol(&value).token().data(), "75%");
//! ```

use crate::error::{Error, Result};
use crate::token::{LexKind, Symbol, Token, TokenKind};
use crate::value::{Native, Value};
use std::fmt;
use std::sync::Arc;

/// Bidirectional conversion between a symbol's text and a native value.
pub trait XclType: fmt::Debug + Send + Sync {
    /// Name of the type as declared in a class.
    fn name(&self) -> &str;

    /// Parses `symbol.name()` into a native value.
    fn parse(&self, symbol: &Symbol) -> Result<Native>;

    /// Canonical literal text of `native`, as it appears in a token.
    fn format(&self, native: &Native) -> String;

    /// Returns `true` if `native` is a valid representation for this type.
    fn accepts(&self, native: &Native) -> bool;

    /// Initial native value of a field declared with this type.
    fn zero(&self) -> Native;

    /// Resolved symbol name for `native`; differs from [`format`](XclType::format)
    /// only for literals whose token text is quoted or escaped.
    fn symbol_name(&self, native: &Native) -> String {
        self.format(native)
    }

    fn lex_kind(&self) -> LexKind {
        LexKind::Identifier
    }

    fn token_kind(&self) -> TokenKind {
        TokenKind::Value
    }
}

/// Shared handle to a type descriptor.
///
/// Two handles are equal when their types have the same name.
#[derive(Clone)]
pub struct TypeRef(Arc<dyn XclType>);

impl TypeRef {
    pub fn new<T: XclType + 'static>(ty: T) -> Self {
        TypeRef(Arc::new(ty))
    }

    #[must_use]
    pub fn from_arc(ty: Arc<dyn XclType>) -> Self {
        TypeRef(ty)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Borrows the underlying descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &dyn XclType {
        &*self.0
    }

    /// Converts a parsed symbol into a value whose textual origin is the
    /// symbol's token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] if the literal text is malformed.
    pub fn symbol_to_value(&self, symbol: &Symbol) -> Result<Value> {
        let native = self.0.parse(symbol)?;
        Ok(Value::with_token(symbol.token().clone(), self.clone(), native))
    }

    /// Produces a fresh symbol carrying the canonical form of `value`.
    #[must_use]
    pub fn value_to_symbol(&self, value: &Value) -> Symbol {
        let native = value.native();
        let token = Token::new(self.0.lex_kind(), self.0.token_kind(), self.0.format(native));
        Symbol::with_name(self.0.symbol_name(native), token)
    }

    /// Canonical token text of `value`.
    #[must_use]
    pub fn token_data(&self, value: &Value) -> String {
        self.0.format(value.native())
    }

    /// Wraps a native read from a host object; the result has no textual origin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `native` is not of this type's kind.
    pub fn to_value(&self, native: Native) -> Result<Value> {
        if !self.0.accepts(&native) {
            return Err(Error::type_mismatch(self.name(), native.kind_name()));
        }
        Ok(Value::new(self.clone(), native))
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.name() == other.name()
    }
}

impl Eq for TypeRef {}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
