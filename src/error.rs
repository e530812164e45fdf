//! Error types for value conversion and host binding.
//!
//! ## Error Categories
//!
//! - **Conversion errors**: a literal could not be parsed into its declared type.
//!   These carry the offending symbol so the caller can point at its token.
//! - **Type mismatches**: a native or typed value reached a field of another type.
//! - **Binding errors**: the host object failed to construct, read or write a field.
//!
//! ## Examples
//!
//! ```rust
//! use xcl::{primitives, Symbol};
//!
//! let symbol = Symbol::value("maybe");
//! let err = primitives::boolean().symbol_to_value(&symbol).unwrap_err();
//! assert!(err.to_string().contains("`maybe`"));
//! ```

use crate::token::Symbol;
use std::fmt;
use thiserror::Error;

/// Represents every failure the round-trip engine can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A symbol's literal text cannot be parsed as the declared type
    #[error("Can't parse `{}` as {type_name}: {message}", .symbol.name())]
    Conversion {
        symbol: Symbol,
        type_name: String,
        message: String,
    },

    /// A value of one type was handed to a slot of another
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// The field does not belong to the class
    #[error("Class `{class}` has no field `{field}`")]
    UnknownField { class: String, field: String },

    /// A class declared the same field name twice
    #[error("Class `{class}` declares field `{field}` more than once")]
    DuplicateField { class: String, field: String },

    /// An enum type was declared without variants
    #[error("Enum `{name}` declares no variants")]
    EmptyEnum { name: String },

    /// Host object failure, propagated unchanged
    #[error("Host binding error: {0}")]
    Binding(String),
}

impl Error {
    /// Creates a conversion error for `symbol`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use xcl::{Error, Symbol};
    ///
    /// let err = Error::conversion(&Symbol::value("12x"), "int", "invalid digit");
    /// assert_eq!(err.to_string(), "Can't parse `12x` as int: invalid digit");
    /// ```
    pub fn conversion<T: fmt::Display>(symbol: &Symbol, type_name: &str, message: T) -> Self {
        Error::Conversion {
            symbol: symbol.clone(),
            type_name: type_name.to_string(),
            message: message.to_string(),
        }
    }

    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn unknown_field(class: &str, field: &str) -> Self {
        Error::UnknownField {
            class: class.to_string(),
            field: field.to_string(),
        }
    }

    pub fn duplicate_field(class: &str, field: &str) -> Self {
        Error::DuplicateField {
            class: class.to_string(),
            field: field.to_string(),
        }
    }

    pub fn empty_enum(name: &str) -> Self {
        Error::EmptyEnum {
            name: name.to_string(),
        }
    }

    /// Creates a host binding error with a display message.
    pub fn binding<T: fmt::Display>(msg: T) -> Self {
        Error::Binding(msg.to_string())
    }

    /// Returns `true` for errors raised while parsing a literal.
    #[must_use]
    pub fn is_conversion(&self) -> bool {
        matches!(self, Error::Conversion { .. })
    }

    /// The symbol that failed to convert, for conversion errors.
    #[must_use]
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Error::Conversion { symbol, .. } => Some(symbol),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
