//! Field parser bindings and the uniform suspendable call path.
//!
//! Parsers are plain function values with one fixed signature, always
//! invoked through a boxed future. There is no sync/async distinction at
//! the engine level; a cheap synchronous parser simply returns an already
//! ready future.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::BindingError;
use crate::message::IncomingMessage;
use crate::types::ParsedArguments;

/// Call arguments handed to a field parser.
pub struct ParserInput<'a> {
    /// The message being parsed.
    pub message: &'a dyn IncomingMessage,
    /// Resolved token slice, or the whole remaining text for `whole_text`
    /// bindings.
    pub value: Value,
    /// Fields resolved so far; present only for `last_fields` bindings.
    pub resolved: Option<&'a ParsedArguments>,
    /// Side-channel payload left by an earlier field; present only for
    /// `communicate` bindings.
    pub payload: Option<&'a Value>,
}

/// Result of a field parser invocation.
///
/// The payload is the explicit side channel between fields: `Some`
/// replaces the payload seen by later `communicate` bindings, `None`
/// leaves the previous one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserOutput {
    pub value: Value,
    pub payload: Option<Value>,
}

impl ParserOutput {
    /// Output carrying only a value.
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            payload: None,
        }
    }

    /// Output carrying a value and a payload for later fields.
    pub fn with_payload(value: impl Into<Value>, payload: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            payload: Some(payload.into()),
        }
    }
}

/// Uniform suspendable parser function.
pub type ParserFn = Arc<
    dyn for<'a> Fn(ParserInput<'a>) -> BoxFuture<'a, Result<ParserOutput, BindingError>>
        + Send
        + Sync,
>;

/// Compiled per-field parser: the shared function plus its input flags.
#[derive(Clone)]
pub struct FieldParser {
    pub(crate) parser: ParserFn,
    pub(crate) whole_text: bool,
    pub(crate) last_fields: bool,
    pub(crate) communicate: bool,
}

impl FieldParser {
    pub(crate) async fn invoke(
        &self,
        input: ParserInput<'_>,
    ) -> Result<ParserOutput, BindingError> {
        (self.parser)(input).await
    }
}

impl fmt::Debug for FieldParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldParser")
            .field("whole_text", &self.whole_text)
            .field("last_fields", &self.last_fields)
            .field("communicate", &self.communicate)
            .finish_non_exhaustive()
    }
}

/// Authoring-time binding of one parser function to one or more fields.
///
/// # Examples
///
/// ```
/// use futures::future::BoxFuture;
/// use message_schema_core::{
///     BindingError, FieldDescriptor, FieldIndex, ParserBinding, ParserInput, ParserOutput,
///     SchemaBuilder,
/// };
///
/// fn to_upper(input: ParserInput<'_>) -> BoxFuture<'_, Result<ParserOutput, BindingError>> {
///     Box::pin(async move {
///         let text = input
///             .value
///             .as_str()
///             .ok_or_else(|| BindingError::InvalidValue("expected a single token".into()))?;
///         Ok(ParserOutput::value(text.to_uppercase()))
///     })
/// }
///
/// let schema = SchemaBuilder::new("title")
///     .field(FieldDescriptor::new("title").spanning(FieldIndex::full()))
///     .parser(ParserBinding::new(["title"], to_upper).whole_text())
///     .build()
///     .unwrap();
///
/// assert!(schema.parser_for("title").is_some());
/// ```
#[derive(Clone)]
pub struct ParserBinding {
    pub(crate) fields: Vec<String>,
    pub(crate) parser: FieldParser,
}

impl ParserBinding {
    /// Binds `parser` to the named fields.
    pub fn new<I, S, F>(fields: I, parser: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: for<'a> Fn(ParserInput<'a>) -> BoxFuture<'a, Result<ParserOutput, BindingError>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            parser: FieldParser {
                parser: Arc::new(parser),
                whole_text: false,
                last_fields: false,
                communicate: false,
            },
        }
    }

    /// Hand the parser the whole remaining text instead of the token slice.
    pub fn whole_text(mut self) -> Self {
        self.parser.whole_text = true;
        self
    }

    /// Hand the parser every field value resolved so far.
    pub fn last_fields(mut self) -> Self {
        self.parser.last_fields = true;
        self
    }

    /// Hand the parser the communication payload from earlier fields.
    pub fn communicate(mut self) -> Self {
        self.parser.communicate = true;
        self
    }
}

impl fmt::Debug for ParserBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserBinding")
            .field("fields", &self.fields)
            .field("parser", &self.parser)
            .finish()
    }
}
