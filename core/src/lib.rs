//! Declarative argument parsing for bot command messages.
//!
//! This crate turns raw incoming message text into typed, validated
//! argument records consumed by command handlers:
//!
//! - [`FieldDescriptor`] — one named argument with its token index,
//!   fallback policy, and user-facing description.
//! - [`ParserBinding`] — an optional suspendable parser attached to one or
//!   more fields, with whole-text, last-fields, and communication inputs.
//! - [`SchemaBuilder`] / [`SchemaDefinition`] — build-time assembly and the
//!   resulting immutable schema, with explicit parent extension and
//!   override-by-name merging.
//! - [`SchemaRegistry`] — one shared lookup table, written at startup and
//!   read concurrently afterwards.
//! - [`parse`] — the per-message entry point producing [`ParsedArguments`]
//!   or a [`ParseError`].
//!
//! Schema authoring defects ([`SchemaError`]) surface while definitions are
//! built, before any message is served. Per-message failures stay inside
//! the closed [`ParseError`] set and are consumed at the dispatch boundary.
//!
//! # Example
//!
//! ```
//! use message_schema_core::*;
//!
//! let schema = SchemaBuilder::new("warn")
//!     .field(FieldDescriptor::new("user").at(0).with_description("user to warn"))
//!     .field(FieldDescriptor::new("reason").spanning(FieldIndex::tail(1)).nullable())
//!     .build()
//!     .unwrap();
//!
//! let message = PlainMessage::with_text(1, "/warn spammer flooding the chat");
//! let args = futures::executor::block_on(parse(&schema, &message, ParseOptions::default()))
//!     .unwrap();
//!
//! assert_eq!(args.get("user").unwrap(), "spammer");
//! assert_eq!(args.get("reason").unwrap(), &serde_json::json!(["flooding", "the", "chat"]));
//! ```

mod binding;
mod error;
mod merge;
mod message;
mod parse;
mod registry;
mod resolve;
mod tokenize;
mod types;

pub use binding::{FieldParser, ParserBinding, ParserFn, ParserInput, ParserOutput};
pub use error::{BindingError, ParseError, SchemaError};
pub use merge::SchemaBuilder;
pub use message::{IncomingMessage, PlainMessage};
pub use parse::{ParseOptions, parse};
pub use registry::SchemaRegistry;
pub use tokenize::RootTokenizer;
pub use types::{
    DEFAULT_SEPARATOR, Fallback, FieldDescriptor, FieldIndex, ParsedArguments, SchemaDefinition,
};
