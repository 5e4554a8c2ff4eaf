//! Startup-time registry of built schema definitions.

use std::sync::Arc;

use crate::error::SchemaError;
use crate::types::SchemaDefinition;

/// Registry of immutable schema definitions.
///
/// Written once while the process starts, then shared read-only: lookups
/// take `&self` and the definitions themselves never change, so no locking
/// is needed for concurrent parses.
///
/// # Examples
///
/// ```
/// use message_schema_core::{FieldDescriptor, SchemaBuilder, SchemaRegistry};
///
/// let mut registry = SchemaRegistry::new();
/// let schema = SchemaBuilder::new("echo")
///     .field(FieldDescriptor::new("text").at(0))
///     .build()
///     .unwrap();
///
/// registry.register(schema).unwrap();
/// assert!(registry.get("echo").is_some());
/// assert!(registry.require("missing").is_err());
/// ```
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: Vec<Arc<SchemaDefinition>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a built definition under its own name.
    pub fn register(
        &mut self,
        definition: SchemaDefinition,
    ) -> Result<Arc<SchemaDefinition>, SchemaError> {
        if self.get(definition.name()).is_some() {
            return Err(SchemaError::DuplicateSchema(definition.name().to_owned()));
        }
        let definition = Arc::new(definition);
        self.schemas.push(Arc::clone(&definition));
        Ok(definition)
    }

    /// Looks up a definition by schema name.
    pub fn get(&self, name: &str) -> Option<Arc<SchemaDefinition>> {
        self.schemas.iter().find(|s| s.name() == name).cloned()
    }

    /// Like [`get`](Self::get), treating a miss as the authoring defect it
    /// is at dispatch time.
    pub fn require(&self, name: &str) -> Result<Arc<SchemaDefinition>, SchemaError> {
        self.get(name)
            .ok_or_else(|| SchemaError::NoParserGiven(name.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
