//! Error taxonomy for schema authoring and per-message parsing.
//!
//! Two families with very different lifecycles: [`SchemaError`] values are
//! authoring defects and must halt startup before any traffic is served,
//! while [`ParseError`] values are produced per message and are consumed at
//! the dispatch boundary, never inside handler code.

use thiserror::Error;

use crate::types::FieldDescriptor;

/// Per-message parse failures surfaced to the dispatch boundary.
///
/// # Examples
///
/// ```
/// use message_schema_core::{FieldDescriptor, ParseError};
///
/// let error = ParseError::MissingField {
///     name: "target".to_owned(),
///     field: FieldDescriptor::new("target").with_description("user to act on"),
/// };
/// assert_eq!(error.to_string(), "missing required field: target");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The message carried no argument text and the schema requires some.
    #[error("no arguments given")]
    NoArgsGiven,
    /// A specific field could not be resolved and had no default or null
    /// fallback. Carries the descriptor so the reply can hint with the
    /// field's description.
    #[error("missing required field: {name}")]
    MissingField {
        name: String,
        field: FieldDescriptor,
    },
    /// A field parser rejected the invocation and no fallback applied.
    /// The whole command invocation is dropped with no reply.
    #[error("parsing skipped")]
    SkipParsing,
}

/// Schema authoring defects, raised while building or registering
/// definitions at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two local bindings in the same schema cover one field. Overriding an
    /// inherited binding is fine; binding a field twice locally is not.
    #[error("schema '{schema}' binds multiple parsers to field '{field}'")]
    MultipleFieldParser { schema: String, field: String },
    /// A schema was referenced or built with no field/parser metadata at all.
    #[error("no field or parser metadata for schema '{0}'")]
    NoParserGiven(String),
    /// A binding names a field the schema never declares.
    #[error("schema '{schema}' binds a parser to undeclared field '{field}'")]
    UnknownParserField { schema: String, field: String },
    /// Two definitions were registered under the same name.
    #[error("schema '{0}' is already registered")]
    DuplicateSchema(String),
}

/// Failures raised by field parser bindings.
///
/// Both variants are recoverable at the engine level: a field with a
/// default or null fallback absorbs the failure, any other field aborts
/// the parse with [`ParseError::SkipParsing`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// The resolved token(s) did not have the shape or type the parser
    /// expected.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// An explicit assertion made by the parser did not hold.
    #[error("assertion failed: {0}")]
    AssertionFailed(String),
}
