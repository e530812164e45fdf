//! Live section instances and token regeneration.
//!
//! An [`Instance`] binds a [`ClassType`] to one host object. It keeps the
//! current value of every field, the set of fields whose text may be stale,
//! and the last valid token rendering of the section.
//!
//! [`Instance::generate_tokens`] decides per instance whether the cached tokens
//! still describe the current state:
//!
//! - **Reuse**: no cached field-name token refers to a dirty field. The cache is
//!   returned as is, so untouched sections are written back byte for byte.
//! - **Rebuild**: the whole section is synthesized from the field values in
//!   declared order. Interior comments and spacing of that section are lost.
//!
//! ## Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use xcl::{primitives, ClassType, Instance};
//!
//! let class = Arc::new(
//!     ClassType::record("Server")
//!         .with_field("Port", primitives::integer())?
//!         .with_field("Debug", primitives::boolean())?,
//! );
//!
//! let mut server = Instance::new(class, None)?;
//! server.set("Port", 8080)?;
//! assert_eq!(server.to_text(), "\n\nServer {\n  Port = 8080\n  Debug = false\n}");
//! # Ok::<(), xcl::Error>(())
//! ```

use crate::class::{ClassType, Field, HostObject};
use crate::error::{Error, Result};
use crate::options::RenderOptions;
use crate::token::{write_tokens, Symbol, Token, TokenKind};
use crate::types::{TypeRef, XclType};
use crate::value::{Native, Value};
use indexmap::IndexSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// What the external parser hands over for one section.
#[derive(Clone, Debug, Default)]
pub struct ParsedSection {
    /// Tokens before the section, such as leading comments
    pub pre_tokens: Vec<Token>,
    /// The full token rendering of the section
    pub tokens: Vec<Token>,
    pub parameter: Option<Value>,
    /// Field assignments as written, by field name
    pub fields: Vec<(String, Symbol)>,
}

/// The mutable runtime binding of a class to one host object.
pub struct Instance {
    class: Arc<ClassType>,
    parameter: Option<Value>,
    host: Box<dyn HostObject>,
    // one entry per declared field, in declared order
    values: Vec<Value>,
    dirty: IndexSet<usize>,
    pre_tokens: Option<Vec<Token>>,
    tokens: Option<Vec<Token>>,
    options: RenderOptions,
}

impl Instance {
    /// Creates an instance with no originating text.
    ///
    /// Field values are read back from the freshly constructed host object.
    ///
    /// # Errors
    ///
    /// Propagates host binding failures.
    pub fn new(class: Arc<ClassType>, parameter: Option<Value>) -> Result<Self> {
        let host = class.construct(parameter.as_ref())?;
        let values = class
            .fields()
            .map(|field| class.get_field_value(host.as_ref(), field))
            .collect::<Result<Vec<_>>>()?;

        Ok(Instance {
            class,
            parameter,
            host,
            values,
            dirty: IndexSet::new(),
            pre_tokens: None,
            tokens: None,
            options: RenderOptions::default(),
        })
    }

    /// Creates an instance from a parsed section.
    ///
    /// Every assignment is converted through its field's declared type and
    /// pushed into the host object. Fields the section does not mention are
    /// read back from the host and have no textual origin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] for a malformed literal,
    /// [`Error::UnknownField`] for an assignment to an undeclared field, and
    /// propagates host binding failures.
    pub fn from_parsed(class: Arc<ClassType>, section: ParsedSection) -> Result<Self> {
        let ParsedSection {
            pre_tokens,
            tokens,
            parameter,
            fields,
        } = section;

        let mut host = class.construct(parameter.as_ref())?;
        let mut parsed: Vec<Option<Value>> = vec![None; class.len()];
        for (name, symbol) in &fields {
            let field = class
                .field(name)
                .ok_or_else(|| Error::unknown_field(class.name(), name))?;
            let value = field.ty().symbol_to_value(symbol)?;
            class.set_field_value(host.as_mut(), field, &value)?;
            parsed[field.index()] = Some(value);
        }

        let values = class
            .fields()
            .zip(parsed)
            .map(|(field, value)| match value {
                Some(value) => Ok(value),
                None => class.get_field_value(host.as_ref(), field),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Instance {
            class,
            parameter,
            host,
            values,
            dirty: IndexSet::new(),
            pre_tokens: Some(pre_tokens),
            tokens: Some(tokens),
            options: RenderOptions::default(),
        })
    }

    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    #[must_use]
    pub fn class(&self) -> &Arc<ClassType> {
        &self.class
    }

    #[must_use]
    pub fn parameter(&self) -> Option<&Value> {
        self.parameter.as_ref()
    }

    #[must_use]
    pub fn host(&self) -> &dyn HostObject {
        self.host.as_ref()
    }

    /// Mutable access to the host object. Call [`update_data`](Self::update_data)
    /// after changing it directly.
    pub fn host_mut(&mut self) -> &mut dyn HostObject {
        self.host.as_mut()
    }

    /// Downcasts the host object to its concrete type.
    #[must_use]
    pub fn host_as<T: 'static>(&self) -> Option<&T> {
        self.host.as_any().downcast_ref::<T>()
    }

    pub fn host_as_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.host.as_any_mut().downcast_mut::<T>()
    }

    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if `field` belongs to another class.
    pub fn get_value(&self, field: &Field) -> Result<&Value> {
        self.class.check_field(field)?;
        Ok(&self.values[field.index()])
    }

    /// Looks a value up by field name.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.class
            .field(name)
            .map(|field| &self.values[field.index()])
    }

    /// Field values in declared order.
    pub fn values(&self) -> impl Iterator<Item = (&Field, &Value)> + '_ {
        self.class.fields().zip(self.values.iter())
    }

    /// Replaces a field's value, marks it dirty and writes it to the host object.
    ///
    /// The field stays dirty even if the host rejects the value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] or [`Error::TypeMismatch`] before touching
    /// any state, and propagates host binding failures.
    pub fn set_value(&mut self, field: &Field, value: Value) -> Result<()> {
        self.class.check_field(field)?;
        if value.ty() != field.ty() {
            return Err(Error::type_mismatch(field.ty().name(), value.type_name()));
        }

        self.dirty.insert(field.index());
        self.class
            .set_field_value(self.host.as_mut(), field, &value)?;
        self.values[field.index()] = value;
        Ok(())
    }

    /// Sets a field by name from a native value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] for an undeclared name and
    /// [`Error::TypeMismatch`] if `native` does not fit the declared type.
    pub fn set(&mut self, name: &str, native: impl Into<Native>) -> Result<()> {
        let class = Arc::clone(&self.class);
        let field = class
            .field(name)
            .ok_or_else(|| Error::unknown_field(class.name(), name))?;
        let value = field.ty().to_value(native.into())?;
        self.set_value(field, value)
    }

    /// Re-reads every field from the host object after it was changed directly.
    ///
    /// A field with a textual origin becomes dirty when its canonical text
    /// differs from that origin. A field without one becomes dirty when its
    /// value differs from the zero value of its native kind. Cached natives are
    /// always refreshed; textual origins are left for regeneration to replace.
    ///
    /// # Errors
    ///
    /// Propagates host binding failures, including a host returning a native
    /// of the wrong kind.
    pub fn update_data(&mut self) -> Result<()> {
        for field in self.class.fields() {
            let fresh = self.class.get_field_value(self.host.as_ref(), field)?;
            let cached = &mut self.values[field.index()];

            let changed = match cached.name() {
                None => !fresh.native().is_zero(),
                Some(name) => field.ty().token_data(&fresh) != name,
            };
            if changed && self.dirty.insert(field.index()) {
                trace!(class = %self.class.name(), field = %field.name(), "field marked dirty");
            }
            cached.set_native(fresh.into_native());
        }
        Ok(())
    }

    #[must_use]
    pub fn is_dirty(&self, field: &Field) -> bool {
        self.class.contains(field) && self.dirty.contains(&field.index())
    }

    /// Dirty fields in the order they became dirty.
    pub fn dirty_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.dirty
            .iter()
            .filter_map(|&index| self.class.field_at(index))
    }

    #[must_use]
    pub fn has_dirty_fields(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Tokens preceding the section; never touched by regeneration.
    #[must_use]
    pub fn pre_tokens(&self) -> Option<&[Token]> {
        self.pre_tokens.as_deref()
    }

    pub fn set_pre_tokens(&mut self, tokens: Vec<Token>) {
        self.pre_tokens = Some(tokens);
    }

    /// The cached token rendering, `None` for an instance never parsed nor generated.
    #[must_use]
    pub fn tokens(&self) -> Option<&[Token]> {
        self.tokens.as_deref()
    }

    /// Returns the tokens representing the current state and clears the dirty set.
    ///
    /// The cache is reused unless one of its field-name tokens names a dirty
    /// field, or there is no cache yet.
    ///
    /// Leading blank lines are only emitted when there is no cache. A fresh
    /// instance gets them on its first rendering, and later rebuilds start
    /// directly with the type name. Callers joining several sections must put
    /// a separator in the pre-tokens themselves.
    pub fn generate_tokens(&mut self) -> &[Token] {
        let reusable = match &self.tokens {
            Some(tokens) => !tokens
                .iter()
                .any(|token| token.is_field_name() && self.is_dirty_name(token.data())),
            None => false,
        };

        if reusable {
            debug!(class = %self.class.name(), "reusing cached tokens");
        } else {
            let tokens = self.build_tokens();
            debug!(
                class = %self.class.name(),
                count = tokens.len(),
                "regenerated section tokens"
            );
            self.tokens = Some(tokens);
        }
        self.dirty.clear();

        self.tokens.as_deref().unwrap_or(&[])
    }

    /// The persisted text of this section: pre-tokens followed by the
    /// generated tokens.
    pub fn to_text(&mut self) -> String {
        let mut text = self
            .pre_tokens
            .as_ref()
            .map(|tokens| write_tokens(tokens))
            .unwrap_or_default();
        text.push_str(&write_tokens(self.generate_tokens()));
        text
    }

    /// This instance as a class-typed value, named by its type-name token.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let ty = TypeRef::from_arc(Arc::clone(&self.class) as Arc<dyn XclType>);
        Value::with_token(self.class.type_name_token(), ty, Native::Section)
    }

    fn is_dirty_name(&self, name: &str) -> bool {
        self.dirty.iter().any(|&index| {
            self.class
                .field_at(index)
                .map_or(false, |field| field.name() == name)
        })
    }

    // template:
    //   Type: parameter {
    //     Field = value
    //   }
    fn build_tokens(&mut self) -> Vec<Token> {
        let options = &self.options;
        let mut tokens = Vec::with_capacity(8 + self.values.len() * 7);

        if self.tokens.is_none() {
            for _ in 0..options.leading_blank_lines {
                tokens.push(Token::newline());
            }
        }

        tokens.push(self.class.type_name_token());

        if let Some(parameter) = self.parameter.as_mut() {
            let ty = parameter.ty().clone();
            let token = ty.value_to_symbol(parameter).into_token();
            tokens.push(Token::operator(TokenKind::ParameterStart, ":"));
            tokens.push(Token::space(options.spacing.clone()));
            tokens.push(token.clone());
            parameter.set_token(token);
        }

        tokens.push(Token::space(options.spacing.clone()));
        tokens.push(Token::operator(TokenKind::SectionStart, "{"));
        tokens.push(Token::newline());

        for (field, value) in self.class.fields().zip(self.values.iter_mut()) {
            let token = field.ty().value_to_symbol(value).into_token();
            tokens.push(Token::space(options.indent.clone()));
            tokens.push(field.token().clone());
            tokens.push(Token::space(options.spacing.clone()));
            tokens.push(Token::operator(TokenKind::SetOperator, "="));
            tokens.push(Token::space(options.spacing.clone()));
            tokens.push(token.clone());
            tokens.push(Token::newline());
            value.set_token(token);
        }

        tokens.push(Token::operator(TokenKind::SectionEnd, "}"));
        tokens
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name())
            .field("parameter", &self.parameter)
            .field("values", &self.values)
            .field("dirty", &self.dirty)
            .field("cached", &self.tokens.is_some())
            .finish()
    }
}
