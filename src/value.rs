//! Typed runtime values.
//!
//! ## Core Types
//!
//! - [`Native`]: the native representation a host object stores for a field
//! - [`Value`]: a native paired with its owning type and, when it was parsed,
//!   the token it came from
//!
//! A value's [`name`](Value::name) is the literal text of its originating token.
//! Values built from host data have no name until the regenerator gives them one.
//!
//! ```rust
//! use xcl::{primitives, Native, Value};
//!
//! let fresh = Value::new(primitives::integer(), Native::Integer(8080));
//! assert_eq!(fresh.name(), None);
//! assert_eq!(fresh.as_i64(), Some(8080));
//! ```

use crate::token::Token;
use crate::types::TypeRef;
use chrono::{DateTime, Utc};
use std::fmt;

/// Native representation of a field value.
///
/// Every kind knows its own zero value, see [`Native::zero`].
#[derive(Clone, Debug, PartialEq)]
pub enum Native {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Index into the enum type's variant list
    Enum(usize),
    DateTime(DateTime<Utc>),
    /// A nested section; the structure lives in its own instance
    Section,
}

impl Native {
    /// Returns the zero value of the same native kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use xcl::Native;
    ///
    /// assert_eq!(Native::Integer(42).zero(), Native::Integer(0));
    /// assert_eq!(Native::String("x".into()).zero(), Native::String(String::new()));
    /// assert_eq!(Native::Enum(3).zero(), Native::Enum(0));
    /// ```
    #[must_use]
    pub fn zero(&self) -> Native {
        match self {
            Native::Bool(_) => Native::Bool(false),
            Native::Integer(_) => Native::Integer(0),
            Native::Float(_) => Native::Float(0.0),
            Native::String(_) => Native::String(String::new()),
            Native::Enum(_) => Native::Enum(0),
            Native::DateTime(_) => Native::DateTime(DateTime::<Utc>::default()),
            Native::Section => Native::Section,
        }
    }

    /// Returns `true` if this equals the zero value of its kind.
    ///
    /// Floats compare with `==`, so `NaN` is never zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == self.zero()
    }

    /// Short name of the native kind, used in type-mismatch errors.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Native::Bool(_) => "bool",
            Native::Integer(_) => "int",
            Native::Float(_) => "float",
            Native::String(_) => "string",
            Native::Enum(_) => "enum",
            Native::DateTime(_) => "datetime",
            Native::Section => "section",
        }
    }
}

impl From<bool> for Native {
    fn from(b: bool) -> Self {
        Native::Bool(b)
    }
}

impl From<i64> for Native {
    fn from(n: i64) -> Self {
        Native::Integer(n)
    }
}

impl From<i32> for Native {
    fn from(n: i32) -> Self {
        Native::Integer(i64::from(n))
    }
}

impl From<f64> for Native {
    fn from(f: f64) -> Self {
        Native::Float(f)
    }
}

impl From<&str> for Native {
    fn from(s: &str) -> Self {
        Native::String(s.to_string())
    }
}

impl From<String> for Native {
    fn from(s: String) -> Self {
        Native::String(s)
    }
}

impl From<DateTime<Utc>> for Native {
    fn from(dt: DateTime<Utc>) -> Self {
        Native::DateTime(dt)
    }
}

/// A runtime-typed datum with an optional lexical origin.
#[derive(Clone)]
pub struct Value {
    token: Option<Token>,
    ty: TypeRef,
    native: Native,
}

impl Value {
    /// Creates a value with no textual form yet.
    #[must_use]
    pub fn new(ty: TypeRef, native: Native) -> Self {
        Value {
            token: None,
            ty,
            native,
        }
    }

    #[must_use]
    pub fn with_token(token: Token, ty: TypeRef, native: Native) -> Self {
        Value {
            token: Some(token),
            ty,
            native,
        }
    }

    /// Literal text of the originating token, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.token.as_ref().map(Token::data)
    }

    #[must_use]
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    #[must_use]
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    #[must_use]
    pub fn native(&self) -> &Native {
        &self.native
    }

    #[must_use]
    pub fn into_native(self) -> Native {
        self.native
    }

    /// Replaces the native value, leaving the textual origin untouched.
    pub(crate) fn set_native(&mut self, native: Native) {
        self.native = native;
    }

    pub(crate) fn set_token(&mut self, token: Token) {
        self.token = Some(token);
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.native {
            Native::Bool(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self.native {
            Native::Integer(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self.native {
            Native::Float(f) => Some(f),
            Native::Integer(n) => Some(n as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.native {
            Native::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self.native {
            Native::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.ty.name() == other.ty.name()
            && self.native == other.native
            && self.token == other.token
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type", &self.ty.name())
            .field("native", &self.native)
            .field("name", &self.name())
            .finish()
    }
}
