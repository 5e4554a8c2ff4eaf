//! Schema construction with explicit parent extension.
//!
//! Inheritance is a one-shot merge performed at build time:
//! [`SchemaBuilder::extending`] seeds the builder with the parent's
//! fields, parser table, tokenizer, and separator, and local declarations
//! then override by name. An override fully replaces the parent entry;
//! there is no per-attribute merge.
//!
//! # Examples
//!
//! ```
//! use message_schema_core::{FieldDescriptor, FieldIndex, SchemaBuilder};
//!
//! let base = SchemaBuilder::new("warn")
//!     .field(FieldDescriptor::new("user").at(0))
//!     .field(FieldDescriptor::new("reason").spanning(FieldIndex::tail(1)).nullable())
//!     .build()
//!     .unwrap();
//!
//! // Same fields, but the reason becomes required.
//! let strict = SchemaBuilder::extending("swarn", &base)
//!     .field(FieldDescriptor::new("reason").spanning(FieldIndex::tail(1)))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(strict.fields().len(), 2);
//! assert_eq!(strict.fields()[1].name, "reason");
//! ```

use std::sync::Arc;

use crate::binding::{FieldParser, ParserBinding};
use crate::error::SchemaError;
use crate::tokenize::RootTokenizer;
use crate::types::{DEFAULT_SEPARATOR, FieldDescriptor, SchemaDefinition};

/// Builder for [`SchemaDefinition`], used once per schema at startup.
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    inherited_parsers: Vec<(String, FieldParser)>,
    bindings: Vec<ParserBinding>,
    tokenizer: Option<Arc<dyn RootTokenizer>>,
    separator: String,
}

impl SchemaBuilder {
    /// Empty builder with the default separator and no tokenizer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            inherited_parsers: Vec::new(),
            bindings: Vec::new(),
            tokenizer: None,
            separator: DEFAULT_SEPARATOR.to_owned(),
        }
    }

    /// Builder seeded from `parent`: its fields, parsers, tokenizer, and
    /// separator come first, local declarations override by name.
    pub fn extending(name: impl Into<String>, parent: &SchemaDefinition) -> Self {
        Self {
            name: name.into(),
            fields: parent.fields.clone(),
            inherited_parsers: parent.parsers.clone(),
            bindings: Vec::new(),
            tokenizer: parent.tokenizer.clone(),
            separator: parent.separator.clone(),
        }
    }

    /// Declares a field. A field with the same name (inherited or declared
    /// earlier) is replaced in place, keeping its position; new fields are
    /// appended.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Adds a parser binding. Validated at [`build`](Self::build) time.
    pub fn parser(mut self, binding: ParserBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Installs a custom root tokenizer for the whole schema.
    pub fn tokenizer(mut self, tokenizer: impl RootTokenizer + 'static) -> Self {
        self.tokenizer = Some(Arc::new(tokenizer));
        self
    }

    /// Overrides the token separator for the default tokenization path.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Validates the declarations and produces the immutable definition.
    ///
    /// Fails when the schema has no metadata at all, when two local
    /// bindings cover the same field, or when a binding names an
    /// undeclared field. These are authoring defects and must halt
    /// startup.
    pub fn build(self) -> Result<SchemaDefinition, SchemaError> {
        if self.fields.is_empty() && self.bindings.is_empty() && self.inherited_parsers.is_empty()
        {
            return Err(SchemaError::NoParserGiven(self.name));
        }

        let mut parsers = self.inherited_parsers;
        let mut bound_locally: Vec<&str> = Vec::new();

        for binding in &self.bindings {
            for field in &binding.fields {
                if bound_locally.contains(&field.as_str()) {
                    return Err(SchemaError::MultipleFieldParser {
                        schema: self.name.clone(),
                        field: field.clone(),
                    });
                }
                if !self.fields.iter().any(|f| &f.name == field) {
                    return Err(SchemaError::UnknownParserField {
                        schema: self.name.clone(),
                        field: field.clone(),
                    });
                }
                bound_locally.push(field.as_str());

                // A local binding replaces an inherited one for that field.
                match parsers.iter_mut().find(|(name, _)| name == field) {
                    Some(entry) => entry.1 = binding.parser.clone(),
                    None => parsers.push((field.clone(), binding.parser.clone())),
                }
            }
        }

        Ok(SchemaDefinition {
            name: self.name,
            fields: self.fields,
            parsers,
            tokenizer: self.tokenizer,
            separator: self.separator,
        })
    }
}
