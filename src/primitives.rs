//! Primitive type descriptors.
//!
//! | Type | Native | Canonical text |
//! |------|--------|----------------|
//! | `bool` | [`Native::Bool`] | `true`, `false` |
//! | `int` | [`Native::Integer`] | `-42` |
//! | `float` | [`Native::Float`] | `2.5`, `3.0`, `NaN`, `inf` |
//! | `string` | [`Native::String`] | `"quoted \"text\""` |
//! | `datetime` | [`Native::DateTime`] | `"2024-01-15T10:30:00Z"` |
//! | enum | [`Native::Enum`] | the variant name |
//!
//! The stateless kinds are shared singletons, obtained with [`boolean`],
//! [`integer`], [`float`], [`string`] and [`datetime`].

use crate::error::{Error, Result};
use crate::token::{LexKind, Symbol};
use crate::types::{TypeRef, XclType};
use crate::value::Native;
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::OnceLock;

macro_rules! singleton {
    ($(#[$meta:meta])* $fn_name:ident, $ty:expr) => {
        $(#[$meta])*
        #[must_use]
        pub fn $fn_name() -> TypeRef {
            static TYPE: OnceLock<TypeRef> = OnceLock::new();
            TYPE.get_or_init(|| TypeRef::new($ty)).clone()
        }
    };
}

singleton!(
    /// The `bool` type.
    boolean,
    BoolType
);
singleton!(
    /// The `int` type.
    integer,
    IntegerType
);
singleton!(float, FloatType);
singleton!(string, StringType);
singleton!(datetime, DateTimeType);

#[derive(Debug, Clone, Copy, Default)]
pub struct BoolType;

impl XclType for BoolType {
    fn name(&self) -> &str {
        "bool"
    }

    /// Accepts `true`/`false` in any ASCII casing.
    fn parse(&self, symbol: &Symbol) -> Result<Native> {
        let text = symbol.name().trim();
        if text.eq_ignore_ascii_case("true") {
            Ok(Native::Bool(true))
        } else if text.eq_ignore_ascii_case("false") {
            Ok(Native::Bool(false))
        } else {
            Err(Error::conversion(
                symbol,
                "bool",
                "expected `true` or `false`",
            ))
        }
    }

    fn format(&self, native: &Native) -> String {
        match native {
            Native::Bool(true) => "true".to_string(),
            Native::Bool(false) => "false".to_string(),
            other => fallback(other),
        }
    }

    fn accepts(&self, native: &Native) -> bool {
        matches!(native, Native::Bool(_))
    }

    fn zero(&self) -> Native {
        Native::Bool(false)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerType;

impl XclType for IntegerType {
    fn name(&self) -> &str {
        "int"
    }

    fn parse(&self, symbol: &Symbol) -> Result<Native> {
        symbol
            .name()
            .parse::<i64>()
            .map(Native::Integer)
            .map_err(|e| Error::conversion(symbol, "int", e))
    }

    fn format(&self, native: &Native) -> String {
        match native {
            Native::Integer(n) => n.to_string(),
            other => fallback(other),
        }
    }

    fn accepts(&self, native: &Native) -> bool {
        matches!(native, Native::Integer(_))
    }

    fn zero(&self) -> Native {
        Native::Integer(0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FloatType;

impl XclType for FloatType {
    fn name(&self) -> &str {
        "float"
    }

    fn parse(&self, symbol: &Symbol) -> Result<Native> {
        symbol
            .name()
            .parse::<f64>()
            .map(Native::Float)
            .map_err(|e| Error::conversion(symbol, "float", e))
    }

    fn format(&self, native: &Native) -> String {
        match native {
            Native::Float(f) => format_float(*f),
            other => fallback(other),
        }
    }

    fn accepts(&self, native: &Native) -> bool {
        matches!(native, Native::Float(_))
    }

    fn zero(&self) -> Native {
        Native::Float(0.0)
    }
}

/// Shortest round-trip form, always distinguishable from an integer literal.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let text = f.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringType;

impl XclType for StringType {
    fn name(&self) -> &str {
        "string"
    }

    /// The external parser has already unquoted and unescaped the symbol name.
    fn parse(&self, symbol: &Symbol) -> Result<Native> {
        Ok(Native::String(symbol.name().to_string()))
    }

    fn format(&self, native: &Native) -> String {
        match native {
            Native::String(s) => quote(s),
            other => fallback(other),
        }
    }

    fn accepts(&self, native: &Native) -> bool {
        matches!(native, Native::String(_))
    }

    fn zero(&self) -> Native {
        Native::String(String::new())
    }

    fn symbol_name(&self, native: &Native) -> String {
        match native {
            Native::String(s) => s.clone(),
            other => fallback(other),
        }
    }

    fn lex_kind(&self) -> LexKind {
        LexKind::String
    }
}

pub(crate) fn quote(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for ch in s.chars() {
        match ch {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

/// RFC 3339 timestamps, normalized to UTC and written quoted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeType;

impl XclType for DateTimeType {
    fn name(&self) -> &str {
        "datetime"
    }

    fn parse(&self, symbol: &Symbol) -> Result<Native> {
        DateTime::parse_from_rfc3339(symbol.name())
            .map(|dt| Native::DateTime(dt.with_timezone(&Utc)))
            .map_err(|e| Error::conversion(symbol, "datetime", e))
    }

    fn format(&self, native: &Native) -> String {
        quote(&self.symbol_name(native))
    }

    fn accepts(&self, native: &Native) -> bool {
        matches!(native, Native::DateTime(_))
    }

    fn zero(&self) -> Native {
        Native::DateTime(DateTime::<Utc>::default())
    }

    fn symbol_name(&self, native: &Native) -> String {
        match native {
            Native::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            other => fallback(other),
        }
    }

    fn lex_kind(&self) -> LexKind {
        LexKind::String
    }
}

/// An enum type matched by variant name.
///
/// # Examples
///
/// ```rust
/// use xcl::{primitives::EnumType, Symbol};
///
/// let level = EnumType::new("Level", ["Debug", "Info", "Warn"])?.into_type();
/// let value = level.symbol_to_value(&Symbol::value("Info")).unwrap();
/// assert_eq!(value.native(), &xcl::Native::Enum(1));
/// assert!(level.symbol_to_value(&Symbol::value("info")).is_err());
/// # Ok::<(), xcl::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    variants: Vec<String>,
}

impl EnumType {
    /// The first variant is the zero value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyEnum`] if `variants` is empty.
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let variants: Vec<String> = variants.into_iter().map(Into::into).collect();
        if variants.is_empty() {
            return Err(Error::empty_enum(&name));
        }
        Ok(EnumType { name, variants })
    }

    #[must_use]
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    #[must_use]
    pub fn index_of(&self, variant: &str) -> Option<usize> {
        self.variants.iter().position(|v| v == variant)
    }

    #[must_use]
    pub fn into_type(self) -> TypeRef {
        TypeRef::new(self)
    }
}

impl XclType for EnumType {
    fn name(&self) -> &str {
        &self.name
    }

    fn parse(&self, symbol: &Symbol) -> Result<Native> {
        self.index_of(symbol.name()).map(Native::Enum).ok_or_else(|| {
            Error::conversion(
                symbol,
                &self.name,
                format!("expected one of {}", self.variants.join(", ")),
            )
        })
    }

    fn format(&self, native: &Native) -> String {
        match native {
            Native::Enum(index) => self
                .variants
                .get(*index)
                .cloned()
                .unwrap_or_else(|| index.to_string()),
            other => fallback(other),
        }
    }

    fn accepts(&self, native: &Native) -> bool {
        matches!(native, Native::Enum(index) if *index < self.variants.len())
    }

    fn zero(&self) -> Native {
        Native::Enum(0)
    }
}

// Only reachable when a value of the wrong kind was built by hand.
fn fallback(native: &Native) -> String {
    format!("{:?}", native)
}
