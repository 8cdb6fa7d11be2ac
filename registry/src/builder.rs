//! Builders for record shapes and for the immutable Registry.

use crate::{FieldSpec, RecordShape, Registry, RegistryConfig};
use log::debug;
use rekord_core::{RecordError, RecordResult, ShapeId, Value};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading registry configuration.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read shape file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid shape declarations: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Whether a defaulted field may precede a field without a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Reject a field without a default after a defaulted one (default).
    #[default]
    Positional,
    /// Accept any ordering. Fields after a defaulted one must then be
    /// bound by name or positionally in full.
    NamedOnly,
}

/// Builder for a single record shape.
#[derive(Debug)]
pub struct ShapeBuilder {
    name: String,
    fields: Vec<FieldSpec>,
    /// Metadata attached after the field was declared: (field, key, value).
    metadata: Vec<(String, String, Value)>,
    policy: OrderingPolicy,
}

impl ShapeBuilder {
    /// Create a new builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            metadata: Vec::new(),
            policy: OrderingPolicy::default(),
        }
    }

    /// Set the default-ordering policy.
    pub fn policy(mut self, policy: OrderingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Append a field.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Attach metadata to a declared field. Checked when the shape is done.
    pub fn add_metadata(
        mut self,
        field: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.metadata.push((field.into(), key.into(), value.into()));
        self
    }

    /// Validate and finish the shape.
    pub fn done(mut self) -> RecordResult<RecordShape> {
        let mut seen = HashSet::new();
        let mut defaulted = false;
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(RecordError::EmptyFieldName { shape: self.name });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(RecordError::duplicate_field(&self.name, &field.name));
            }
            if self.policy == OrderingPolicy::Positional && defaulted && !field.has_default() {
                return Err(RecordError::default_ordering(&self.name, &field.name));
            }
            defaulted |= field.has_default();
        }

        for (field_name, key, value) in self.metadata {
            let field = self
                .fields
                .iter_mut()
                .find(|f| f.name == field_name)
                .ok_or_else(|| RecordError::unknown_field(&self.name, &field_name))?;
            field.metadata.insert(key, value);
        }

        let shape = RecordShape::new(self.name, self.fields);
        debug!(
            "defined shape {} ({}) with {} fields",
            shape.name(),
            shape.id(),
            shape.arity()
        );
        Ok(shape)
    }
}

/// Builder for constructing an immutable Registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Policy applied to shapes declared through this builder.
    policy: OrderingPolicy,
    /// Shapes being built.
    shapes: HashMap<ShapeId, RecordShape>,
    /// Every id ever defined under a name, oldest first.
    definitions: HashMap<String, Vec<ShapeId>>,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder holding every shape declared in `config`.
    pub fn from_config(config: &RegistryConfig) -> RecordResult<Self> {
        let mut builder = Self::new().with_policy(config.policy);
        for decl in &config.shapes {
            decl.fields
                .iter()
                .cloned()
                .map(FieldSpec::from)
                .fold(builder.add_shape(&decl.name), RegistryShapeBuilder::field)
                .done()?;
        }
        debug!("loaded {} shape declarations", config.shapes.len());
        Ok(builder)
    }

    /// Set the ordering policy for shapes added afterwards.
    pub fn with_policy(mut self, policy: OrderingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Start a shape definition.
    pub fn add_shape(&mut self, name: impl Into<String>) -> RegistryShapeBuilder<'_> {
        let shape = ShapeBuilder::new(name).policy(self.policy);
        RegistryShapeBuilder {
            builder: self,
            shape,
        }
    }

    /// Register an already defined shape.
    ///
    /// A name that is already taken is shadowed: later lookups by name find
    /// the new shape, while the older one stays reachable by id.
    pub fn insert(&mut self, shape: RecordShape) -> ShapeId {
        let id = shape.id();
        let ids = self.definitions.entry(shape.name().to_string()).or_default();
        if let Some(previous) = ids.last() {
            debug!("shape {} ({}) shadows {}", shape.name(), id, previous);
        }
        ids.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Get the id currently bound to a name.
    pub fn get_shape_id(&self, name: &str) -> Option<ShapeId> {
        self.definitions.get(name).and_then(|ids| ids.last()).copied()
    }

    /// Build the immutable Registry.
    pub fn build(self) -> Registry {
        Registry::new(self.shapes, self.definitions)
    }
}

/// Builder for a shape that is registered when done.
pub struct RegistryShapeBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    shape: ShapeBuilder,
}

impl<'a> RegistryShapeBuilder<'a> {
    /// Append a field.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.shape = self.shape.field(field);
        self
    }

    /// Attach metadata to a declared field.
    pub fn add_metadata(
        mut self,
        field: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.shape = self.shape.add_metadata(field, key, value);
        self
    }

    /// Override the registry's ordering policy for this shape.
    pub fn policy(mut self, policy: OrderingPolicy) -> Self {
        self.shape = self.shape.policy(policy);
        self
    }

    /// Finish building this shape and register it.
    pub fn done(self) -> RecordResult<ShapeId> {
        let shape = self.shape.done()?;
        Ok(self.builder.insert(shape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: duplicate_field ==========
    #[test]
    fn test_duplicate_field_rejected() {
        // GIVEN two fields named rank
        let result = ShapeBuilder::new("Card")
            .field(FieldSpec::new("rank"))
            .field(FieldSpec::new("rank"))
            .done();

        // THEN DuplicateField
        assert_eq!(
            result.unwrap_err(),
            RecordError::duplicate_field("Card", "rank")
        );
    }

    // ========== TEST: default_ordering ==========
    #[test]
    fn test_default_ordering_enforced_for_positional() {
        // GIVEN lon has a default and lat does not
        let result = ShapeBuilder::new("Position")
            .field(FieldSpec::new("name"))
            .field(FieldSpec::new("lon").with_default(0.0))
            .field(FieldSpec::new("lat"))
            .done();

        // THEN DefaultOrdering names the offending field
        assert_eq!(
            result.unwrap_err(),
            RecordError::default_ordering("Position", "lat")
        );
    }

    #[test]
    fn test_default_ordering_relaxed_for_named_only() {
        let shape = ShapeBuilder::new("Position")
            .policy(OrderingPolicy::NamedOnly)
            .field(FieldSpec::new("lon").with_default(0.0))
            .field(FieldSpec::new("lat"))
            .done()
            .unwrap();

        assert_eq!(shape.arity(), 2);
    }

    #[test]
    fn test_empty_field_name_rejected() {
        let result = ShapeBuilder::new("Card").field(FieldSpec::new("")).done();

        assert_eq!(
            result.unwrap_err(),
            RecordError::EmptyFieldName {
                shape: "Card".into()
            }
        );
    }

    // ========== TEST: add_metadata ==========
    #[test]
    fn test_add_metadata() {
        let shape = ShapeBuilder::new("Position")
            .field(FieldSpec::new("lat").with_default(0.0))
            .add_metadata("lat", "unit", "degrees")
            .done()
            .unwrap();

        assert_eq!(shape.metadata_of("lat", "unit"), Ok(&Value::from("degrees")));
    }

    #[test]
    fn test_add_metadata_unknown_field() {
        let result = ShapeBuilder::new("Position")
            .field(FieldSpec::new("lat"))
            .add_metadata("alt", "unit", "meters")
            .done();

        assert_eq!(
            result.unwrap_err(),
            RecordError::unknown_field("Position", "alt")
        );
    }

    // ========== TEST: shadowing ==========
    #[test]
    fn test_redefinition_shadows_by_name() {
        // GIVEN Position defined twice
        let mut builder = RegistryBuilder::new();
        let first = builder
            .add_shape("Position")
            .field(FieldSpec::new("name"))
            .field(FieldSpec::new("lon").with_default(0.0))
            .done()
            .unwrap();
        let second = builder
            .add_shape("Position")
            .field(FieldSpec::new("name"))
            .field(FieldSpec::new("lat"))
            .done()
            .unwrap();

        // THEN the name resolves to the newest definition
        assert_ne!(first, second);
        assert_eq!(builder.get_shape_id("Position"), Some(second));
    }

    #[test]
    fn test_builder_policy_applies_to_added_shapes() {
        let mut builder = RegistryBuilder::new().with_policy(OrderingPolicy::NamedOnly);
        let result = builder
            .add_shape("Position")
            .field(FieldSpec::new("lon").with_default(0.0))
            .field(FieldSpec::new("lat"))
            .done();

        assert!(result.is_ok());
    }
}
