//! # xcl
//!
//! Typed, mutable configuration sections that write back to text without
//! disturbing what the author wrote.
//!
//! ## What is XCL?
//!
//! XCL files are made of sections. Each section names a class, takes an optional
//! parameter, and assigns typed fields:
//!
//! ```text
//! # production listener
//! Server: "main" {
//!   Port = 8080
//!   Debug = false
//! }
//! ```
//!
//! This crate is the round-trip engine between the token stream of such a file
//! and live host objects. Lexing, grammar parsing and file I/O belong to the
//! caller: it hands over tokens and symbols per section, and gets tokens back.
//!
//! ## Key Features
//!
//! - **Lossless**: sections nobody touched are written back from their original
//!   tokens, comments and spacing included
//! - **Change-aware**: every field set through [`Instance::set_value`], or changed
//!   on the host object and picked up by [`Instance::update_data`], is reflected
//! - **Typed**: literals convert through [`XclType`] descriptors; malformed text is
//!   a [`Error::Conversion`], never a silent default
//! - **Extensible**: new primitive kinds implement [`XclType`]; nothing else changes
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use xcl::{primitives, write_tokens, xcl_class, Instance, ParsedSection, Symbol};
//! # use xcl::{LexKind, Token, TokenKind};
//!
//! let server = Arc::new(xcl_class!("Server" => {
//!     "Port": primitives::integer(),
//!     "Debug": primitives::boolean(),
//! })?);
//!
//! // Normally produced by the parser for `Server {\n  Debug = false\n}`
//! let debug = Symbol::value("false");
//! let section = ParsedSection {
//!     tokens: vec![
//!         Token::new(LexKind::Identifier, TokenKind::TypeName, "Server"),
//!         Token::space(" "),
//!         Token::operator(TokenKind::SectionStart, "{"),
//!         Token::newline(),
//!         Token::space("  "),
//!         Token::new(LexKind::Identifier, TokenKind::FieldName, "Debug"),
//!         Token::space(" "),
//!         Token::operator(TokenKind::SetOperator, "="),
//!         Token::space(" "),
//!         debug.token().clone(),
//!         Token::newline(),
//!         Token::operator(TokenKind::SectionEnd, "}"),
//!     ],
//!     fields: vec![("Debug".to_string(), debug)],
//!     ..ParsedSection::default()
//! };
//!
//! let mut instance = Instance::from_parsed(server, section)?;
//! assert_eq!(write_tokens(instance.generate_tokens()), "Server {\n  Debug = false\n}");
//!
//! instance.set("Debug", true)?;
//! assert_eq!(
//!     write_tokens(instance.generate_tokens()),
//!     "Server {\n  Port = 0\n  Debug = true\n}"
//! );
//! # Ok::<(), xcl::Error>(())
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Reuse check**: O(tokens × dirty fields) per regeneration
//! - **Rebuild**: O(fields)
//! - **update_data**: O(fields)
//!
//! ## Concurrency
//!
//! Instances are `Send` but have no internal locking. Share one across threads
//! only behind a mutex.

pub mod class;
pub mod error;
pub mod instance;
pub mod macros;
pub mod options;
pub mod primitives;
pub mod token;
pub mod types;
pub mod value;

pub use class::{ClassType, Field, HostFactory, HostObject, Record, RecordFactory};
pub use error::{Error, Result};
pub use instance::{Instance, ParsedSection};
pub use options::RenderOptions;
pub use token::{write_tokens, LexKind, Symbol, Token, TokenKind};
pub use types::{TypeRef, XclType};
pub use value::{Native, Value};
