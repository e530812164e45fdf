//! Class types and the host binding.
//!
//! A [`ClassType`] describes a named section: its ordered, uniquely named fields
//! and the [`HostFactory`] that builds the native object backing each instance.
//! The host object reads and writes fields through [`HostObject`].
//!
//! [`Record`] is a ready-made dynamic host object for classes that have no
//! dedicated Rust struct.
//!
//! ## Examples
//!
//! ```rust
//! use xcl::{primitives, ClassType};
//!
//! let server = ClassType::record("Server")
//!     .with_field("Port", primitives::integer())?
//!     .with_field("Debug", primitives::boolean())?;
//!
//! let names: Vec<_> = server.fields().map(|f| f.name()).collect();
//! assert_eq!(names, vec!["Port", "Debug"]);
//! assert!(server.clone().with_field("Port", primitives::string()).is_err());
//! # Ok::<(), xcl::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::token::{LexKind, Symbol, Token, TokenKind};
use crate::types::{TypeRef, XclType};
use crate::value::{Native, Value};
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(0);

fn next_class_id() -> u64 {
    NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed)
}

/// A declared slot of a class.
///
/// Two fields are equal iff they are the same slot of the same class.
#[derive(Clone, Debug)]
pub struct Field {
    class: Arc<str>,
    class_id: u64,
    index: usize,
    name: String,
    ty: TypeRef,
    token: Token,
}

impl Field {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// The field-name token emitted when the section is regenerated.
    #[must_use]
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Position in the declared field order.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.class_id == other.class_id
    }
}

impl Eq for Field {}

/// The live native object behind an instance.
pub trait HostObject: fmt::Debug + Send {
    fn get_field(&self, field: &Field) -> Result<Native>;

    fn set_field(&mut self, field: &Field, value: &Value) -> Result<()>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Builds the host object for a new instance from its optional parameter.
///
/// Implemented for any `Fn(&ClassType, Option<&Value>) -> Result<Box<dyn HostObject>>`.
pub trait HostFactory: Send + Sync {
    fn construct(&self, class: &ClassType, parameter: Option<&Value>)
        -> Result<Box<dyn HostObject>>;
}

impl<F> HostFactory for F
where
    F: Fn(&ClassType, Option<&Value>) -> Result<Box<dyn HostObject>> + Send + Sync,
{
    fn construct(
        &self,
        class: &ClassType,
        parameter: Option<&Value>,
    ) -> Result<Box<dyn HostObject>> {
        self(class, parameter)
    }
}

/// Compound type descriptor for a named section.
///
/// Every construction and every [`with_field`](Self::with_field) yields a new
/// identity. Clones share it.
#[derive(Clone)]
pub struct ClassType {
    id: u64,
    name: Arc<str>,
    fields: IndexMap<String, Field>,
    factory: Arc<dyn HostFactory>,
}

impl ClassType {
    pub fn new<F: HostFactory + 'static>(name: impl Into<String>, factory: F) -> Self {
        let name: String = name.into();
        ClassType {
            id: next_class_id(),
            name: Arc::from(name),
            fields: IndexMap::new(),
            factory: Arc::new(factory),
        }
    }

    /// A class backed by [`Record`] host objects.
    #[must_use]
    pub fn record(name: impl Into<String>) -> Self {
        ClassType::new(name, RecordFactory)
    }

    /// Appends a field to the declared order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateField`] if the name is already declared.
    pub fn with_field(mut self, name: impl Into<String>, ty: TypeRef) -> Result<Self> {
        let name = name.into();
        if self.fields.contains_key(&name) {
            return Err(Error::duplicate_field(&self.name, &name));
        }
        self.id = next_class_id();
        for field in self.fields.values_mut() {
            field.class_id = self.id;
        }
        let field = Field {
            class: Arc::clone(&self.name),
            class_id: self.id,
            index: self.fields.len(),
            token: Token::new(LexKind::Identifier, TokenKind::FieldName, name.clone()),
            name: name.clone(),
            ty,
        };
        self.fields.insert(name, field);
        Ok(self)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declared order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &Field> + '_ {
        self.fields.values()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn field_at(&self, index: usize) -> Option<&Field> {
        self.fields.get_index(index).map(|(_, field)| field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns `true` if `field` is one of this class's slots.
    #[must_use]
    pub fn contains(&self, field: &Field) -> bool {
        self.field_at(field.index) == Some(field)
    }

    pub(crate) fn check_field(&self, field: &Field) -> Result<()> {
        if self.contains(field) {
            Ok(())
        } else {
            Err(Error::unknown_field(&self.name, field.name()))
        }
    }

    /// Token that opens a section of this class.
    #[must_use]
    pub fn type_name_token(&self) -> Token {
        Token::new(LexKind::Identifier, TokenKind::TypeName, self.name.to_string())
    }

    pub fn construct(&self, parameter: Option<&Value>) -> Result<Box<dyn HostObject>> {
        self.factory.construct(self, parameter)
    }

    /// Reads `field` from the host object as a value with no textual origin.
    pub fn get_field_value(&self, host: &dyn HostObject, field: &Field) -> Result<Value> {
        field.ty.to_value(host.get_field(field)?)
    }

    pub fn set_field_value(
        &self,
        host: &mut dyn HostObject,
        field: &Field,
        value: &Value,
    ) -> Result<()> {
        host.set_field(field, value)
    }

    /// Wraps this class as a type descriptor, for use as a parameter or
    /// field type.
    #[must_use]
    pub fn into_type(self) -> TypeRef {
        TypeRef::new(self)
    }
}

impl fmt::Debug for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassType")
            .field("name", &self.name)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A class-typed value renders as the token that opens its section.
impl XclType for ClassType {
    fn name(&self) -> &str {
        &self.name
    }

    fn parse(&self, symbol: &Symbol) -> Result<Native> {
        Err(Error::conversion(
            symbol,
            &self.name,
            "a section is not a scalar literal",
        ))
    }

    fn format(&self, _native: &Native) -> String {
        self.name.to_string()
    }

    fn accepts(&self, native: &Native) -> bool {
        matches!(native, Native::Section)
    }

    fn zero(&self) -> Native {
        Native::Section
    }

    fn token_kind(&self) -> TokenKind {
        TokenKind::TypeName
    }
}

/// Dynamic host object holding one native per declared field.
///
/// Fields start at their declared type's zero value.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    class: String,
    parameter: Option<Native>,
    values: IndexMap<String, Native>,
}

impl Record {
    #[must_use]
    pub fn for_class(class: &ClassType, parameter: Option<&Value>) -> Self {
        Record {
            class: class.name().to_string(),
            parameter: parameter.map(|p| p.native().clone()),
            values: class
                .fields()
                .map(|f| (f.name().to_string(), f.ty().descriptor().zero()))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Native> {
        self.values.get(name)
    }

    /// Writes a field directly, bypassing the owning instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the class has no such field.
    pub fn set(&mut self, name: &str, native: impl Into<Native>) -> Result<()> {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = native.into();
                Ok(())
            }
            None => Err(Error::unknown_field(&self.class, name)),
        }
    }

    #[must_use]
    pub fn parameter(&self) -> Option<&Native> {
        self.parameter.as_ref()
    }
}

impl HostObject for Record {
    fn get_field(&self, field: &Field) -> Result<Native> {
        self.values
            .get(field.name())
            .cloned()
            .ok_or_else(|| Error::unknown_field(&self.class, field.name()))
    }

    fn set_field(&mut self, field: &Field, value: &Value) -> Result<()> {
        if !field.ty().descriptor().accepts(value.native()) {
            return Err(Error::type_mismatch(
                field.ty().name(),
                value.native().kind_name(),
            ));
        }
        self.set(field.name(), value.native().clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Factory for [`Record`] host objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFactory;

impl HostFactory for RecordFactory {
    fn construct(
        &self,
        class: &ClassType,
        parameter: Option<&Value>,
    ) -> Result<Box<dyn HostObject>> {
        Ok(Box::new(Record::for_class(class, parameter)))
    }
}
