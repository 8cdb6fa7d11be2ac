//! Shape definition types.

use crate::{OrderingPolicy, ShapeBuilder};
use rekord_core::{RecordError, RecordResult, ShapeId, Value};
use std::collections::HashMap;

/// Field definition within a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Field name, unique within its shape.
    pub name: String,
    /// Symbolic type tag (str, float, date, ...). Informational only.
    pub type_hint: Option<String>,
    /// Default value if not provided at construction.
    pub default: Option<Value>,
    /// Auxiliary annotations. Not used in equality or construction.
    pub metadata: HashMap<String, Value>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: None,
            default: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_type(mut self, type_hint: impl Into<String>) -> Self {
        self.type_hint = Some(type_hint.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check if this field can be omitted at construction.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Get a metadata value by key.
    pub fn get_metadata(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}

/// A named, ordered set of field definitions describing a record kind.
///
/// Shapes are immutable after definition and deliberately not `Clone`:
/// every definition carries its own identity.
#[derive(Debug)]
pub struct RecordShape {
    id: ShapeId,
    name: String,
    fields: Vec<FieldSpec>,
}

impl RecordShape {
    pub(crate) fn new(name: String, fields: Vec<FieldSpec>) -> Self {
        Self {
            id: ShapeId::fresh(),
            name,
            fields,
        }
    }

    /// Define a shape that supports positional construction.
    pub fn define(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = FieldSpec>,
    ) -> RecordResult<Self> {
        Self::define_with(name, fields, OrderingPolicy::Positional)
    }

    /// Define a shape under an explicit default-ordering policy.
    pub fn define_with(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = FieldSpec>,
        policy: OrderingPolicy,
    ) -> RecordResult<Self> {
        fields
            .into_iter()
            .fold(ShapeBuilder::new(name).policy(policy), ShapeBuilder::field)
            .done()
    }

    /// Define a shape from bare field names. None of the fields has a default.
    pub fn from_field_names<S: AsRef<str>>(
        name: impl Into<String>,
        field_names: &[S],
    ) -> RecordResult<Self> {
        Self::define(name, field_names.iter().map(|n| FieldSpec::new(n.as_ref())))
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared fields, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Get a field definition by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get the declared position of a field.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Check if this shape has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.field_index(name).is_some()
    }

    /// Get all field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Get the number of fields.
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Look up one metadata value of one field.
    pub fn metadata_of(&self, field: &str, key: &str) -> RecordResult<&Value> {
        let spec = self
            .field(field)
            .ok_or_else(|| RecordError::unknown_field(&self.name, field))?;
        spec.get_metadata(key)
            .ok_or_else(|| RecordError::unknown_metadata_key(field, key))
    }
}

/// The declared fields of a shape, in declaration order.
pub fn fields_of(shape: &RecordShape) -> &[FieldSpec] {
    shape.fields()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn position() -> RecordShape {
        RecordShape::define(
            "Position",
            [
                FieldSpec::new("name").with_type("str"),
                FieldSpec::new("lon")
                    .with_type("float")
                    .with_default(0.0)
                    .with_metadata("unit", "degrees"),
                FieldSpec::new("lat")
                    .with_type("float")
                    .with_default(0.0)
                    .with_metadata("unit", "degrees"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_fields_of_keeps_declaration_order() {
        // GIVEN shape Position(name, lon, lat)
        let shape = position();

        // WHEN fields_of(Position)
        let names: Vec<&str> = fields_of(&shape).iter().map(|f| f.name.as_str()).collect();

        // THEN fields come back as declared
        assert_eq!(names, vec!["name", "lon", "lat"]);
        assert_eq!(shape.arity(), 3);
        assert_eq!(shape.fields()[1].default, Some(Value::Float(0.0)));
        assert_eq!(shape.fields()[0].type_hint.as_deref(), Some("str"));
    }

    #[test]
    fn test_metadata_of() {
        let shape = position();

        assert_eq!(
            shape.metadata_of("lat", "unit"),
            Ok(&Value::String("degrees".into()))
        );
        assert_eq!(
            shape.metadata_of("alt", "unit"),
            Err(RecordError::unknown_field("Position", "alt"))
        );
        assert_eq!(
            shape.metadata_of("name", "unit"),
            Err(RecordError::unknown_metadata_key("name", "unit"))
        );
    }

    #[test]
    fn test_from_field_names() {
        let shape = RecordShape::from_field_names("Position", &["name", "lat", "lon"]).unwrap();

        assert_eq!(
            shape.field_names().collect::<Vec<_>>(),
            vec!["name", "lat", "lon"]
        );
        assert!(shape.fields().iter().all(|f| !f.has_default()));
    }

    #[test]
    fn test_redefinition_yields_distinct_identity() {
        let first = RecordShape::from_field_names("Position", &["name"]).unwrap();
        let second = RecordShape::from_field_names("Position", &["name"]).unwrap();

        assert_eq!(first.name(), second.name());
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_field_lookup() {
        let shape = position();

        assert!(shape.has_field("lon"));
        assert!(!shape.has_field("alt"));
        assert_eq!(shape.field_index("lat"), Some(2));
        assert_eq!(
            shape.field("lon").and_then(|f| f.get_metadata("unit")),
            Some(&Value::from("degrees"))
        );
    }
}
