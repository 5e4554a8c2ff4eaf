//! Schema data model: field descriptors, index specifications, built
//! definitions, and the parsed-argument record.
//!
//! Everything here is immutable after construction. A
//! [`SchemaDefinition`] is built once per command at startup through
//! [`SchemaBuilder`](crate::SchemaBuilder) and is safe to share across
//! concurrent parses; [`ParsedArguments`] is created fresh for every
//! parse call.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::binding::FieldParser;
use crate::tokenize::RootTokenizer;

/// Token separator used when a schema does not override it.
pub const DEFAULT_SEPARATOR: &str = " ";

/// Where a field's value lies in the token sequence.
///
/// # Examples
///
/// ```
/// use message_schema_core::FieldIndex;
///
/// // Third token only.
/// let single = FieldIndex::At(2);
///
/// // Tokens 1 and 2 (half-open range).
/// let range = FieldIndex::span(1, 3);
///
/// // Everything from the second token to the end.
/// let tail = FieldIndex::tail(1);
///
/// assert_eq!(FieldIndex::default(), FieldIndex::At(0));
/// assert_eq!(tail, FieldIndex::Span { start: 1, stop: None });
/// assert_ne!(single, range);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldIndex {
    /// A single token position.
    At(usize),
    /// A half-open token range; `stop: None` consumes to the last token.
    Span { start: usize, stop: Option<usize> },
}

impl Default for FieldIndex {
    fn default() -> Self {
        FieldIndex::At(0)
    }
}

impl FieldIndex {
    /// Range covering `start..stop`.
    pub fn span(start: usize, stop: usize) -> Self {
        FieldIndex::Span {
            start,
            stop: Some(stop),
        }
    }

    /// Open-ended range from `start` to the last token.
    pub fn tail(start: usize) -> Self {
        FieldIndex::Span { start, stop: None }
    }

    /// Every available token.
    pub fn full() -> Self {
        FieldIndex::Span {
            start: 0,
            stop: None,
        }
    }
}

/// What a field resolves to when the tokens cannot satisfy its index.
///
/// Three-state on purpose: an unset sentinel (`Required`), a concrete
/// default, or an explicit permission to resolve to null.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Fallback {
    /// No fallback; the field must resolve from tokens.
    #[default]
    Required,
    /// Concrete value substituted when the field cannot resolve.
    Value(Value),
    /// The field resolves to null when it cannot resolve from tokens.
    Null,
}

impl Fallback {
    /// Substitute value, if this fallback provides one.
    pub fn value(&self) -> Option<Value> {
        match self {
            Fallback::Required => None,
            Fallback::Value(value) => Some(value.clone()),
            Fallback::Null => Some(Value::Null),
        }
    }
}

/// Declaration of one named argument extracted from message text.
///
/// # Examples
///
/// ```
/// use message_schema_core::{Fallback, FieldDescriptor, FieldIndex};
///
/// let field = FieldDescriptor::new("reason")
///     .spanning(FieldIndex::tail(1))
///     .nullable()
///     .with_description("why the user is being warned");
///
/// assert_eq!(field.name, "reason");
/// assert_eq!(field.fallback, Fallback::Null);
///
/// let count = FieldDescriptor::new("count").at(0).with_default(1);
/// assert_eq!(count.fallback, Fallback::Value(1.into()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, the key in the parsed record.
    pub name: String,
    /// Where the field's tokens lie.
    #[serde(default)]
    pub index: FieldIndex,
    /// Policy when the index cannot be satisfied.
    #[serde(default)]
    pub fallback: Fallback,
    /// Short description, used to hint the user when the field is missing.
    #[serde(default)]
    pub description: Option<String>,
}

impl FieldDescriptor {
    /// Field at token position 0, required, with no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: FieldIndex::default(),
            fallback: Fallback::default(),
            description: None,
        }
    }

    /// Sets a single token position.
    pub fn at(mut self, position: usize) -> Self {
        self.index = FieldIndex::At(position);
        self
    }

    /// Sets the full index specification.
    pub fn spanning(mut self, index: FieldIndex) -> Self {
        self.index = index;
        self
    }

    /// Sets a concrete default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.fallback = Fallback::Value(value.into());
        self
    }

    /// Lets the field resolve to null instead of failing.
    pub fn nullable(mut self) -> Self {
        self.fallback = Fallback::Null;
        self
    }

    /// Sets the description used in missing-argument hints.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Immutable argument schema for one command.
///
/// Holds the ordered field declarations, the per-field parser table, the
/// optional root tokenizer, and the token separator. Built once at startup
/// via [`SchemaBuilder`](crate::SchemaBuilder), then shared read-only
/// (typically behind an [`Arc`] from the
/// [`SchemaRegistry`](crate::SchemaRegistry)).
pub struct SchemaDefinition {
    pub(crate) name: String,
    pub(crate) fields: Vec<FieldDescriptor>,
    pub(crate) parsers: Vec<(String, FieldParser)>,
    pub(crate) tokenizer: Option<Arc<dyn RootTokenizer>>,
    pub(crate) separator: String,
}

impl SchemaDefinition {
    /// Schema name, unique within a registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields in processing order (inherited first, then local).
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Finds a field declaration by name.
    pub fn find_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The parser bound to a field, if any.
    pub fn parser_for(&self, field: &str) -> Option<&FieldParser> {
        self.parsers
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, parser)| parser)
    }

    /// Token separator for the default tokenization path.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Custom root tokenizer, when the schema configures one.
    pub fn tokenizer(&self) -> Option<&dyn RootTokenizer> {
        self.tokenizer.as_deref()
    }
}

impl fmt::Debug for SchemaDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaDefinition")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("parsers", &self.parsers)
            .field("custom_tokenizer", &self.tokenizer.is_some())
            .field("separator", &self.separator)
            .finish()
    }
}

/// Field-keyed record produced by a successful parse.
///
/// Entries keep schema declaration order. The record is only ever observed
/// complete: a failed or cancelled parse never exposes a partial one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedArguments {
    entries: Vec<(String, Value)>,
}

impl ParsedArguments {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: &str, value: Value) {
        self.entries.push((name.to_owned(), value));
    }

    /// Value of a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Number of resolved fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates fields in schema declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_fallback_value_substitution() {
        assert_eq!(Fallback::Required.value(), None);
        assert_eq!(Fallback::Value(json!("x")).value(), Some(json!("x")));
        assert_eq!(Fallback::Null.value(), Some(Value::Null));
    }

    #[test]
    fn test_field_descriptor_builders() {
        let field = FieldDescriptor::new("user")
            .at(1)
            .with_default("anyone")
            .with_description("target user");

        assert_eq!(field.index, FieldIndex::At(1));
        assert_eq!(field.fallback, Fallback::Value(json!("anyone")));
        assert_eq!(field.description.as_deref(), Some("target user"));
    }

    #[test]
    fn test_parsed_arguments_keeps_insertion_order() {
        let mut args = ParsedArguments::new();
        args.push("first", json!("a"));
        args.push("second", json!(["b", "c"]));

        assert_eq!(args.len(), 2);
        assert_eq!(args.get("second"), Some(&json!(["b", "c"])));
        assert_eq!(args.get("absent"), None);

        let order: Vec<&str> = args.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["first", "second"]);
    }

    #[test]
    fn test_field_descriptor_serde_round_trip() {
        let field = FieldDescriptor::new("reason")
            .spanning(FieldIndex::tail(1))
            .nullable();

        let encoded = serde_json::to_string(&field).unwrap();
        let decoded: FieldDescriptor = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, field);
    }
}
