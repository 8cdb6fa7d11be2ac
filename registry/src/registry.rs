//! The Registry - immutable shape lookup.

use crate::{FieldSpec, RecordInstance, RecordShape};
use rekord_core::{RecordError, RecordResult, ShapeId, Value, Values};
use std::collections::HashMap;

/// The Registry provides runtime lookup of record shapes by name.
/// It is immutable after construction.
#[derive(Debug)]
pub struct Registry {
    /// Shape definitions by ID, including shadowed ones.
    shapes: HashMap<ShapeId, RecordShape>,
    /// Every ID defined under a name, oldest first. The last one is current.
    definitions: HashMap<String, Vec<ShapeId>>,
}

impl Registry {
    pub(crate) fn new(
        shapes: HashMap<ShapeId, RecordShape>,
        definitions: HashMap<String, Vec<ShapeId>>,
    ) -> Self {
        Self {
            shapes,
            definitions,
        }
    }

    // ==================== Shape Lookups ====================

    /// Get the current shape for a name.
    pub fn get_shape_by_name(&self, name: &str) -> Option<&RecordShape> {
        self.get_shape_id(name).and_then(|id| self.shapes.get(&id))
    }

    /// Get a shape by ID. Shadowed shapes stay reachable this way.
    pub fn get_shape(&self, id: ShapeId) -> Option<&RecordShape> {
        self.shapes.get(&id)
    }

    /// Get the current shape ID for a name.
    pub fn get_shape_id(&self, name: &str) -> Option<ShapeId> {
        self.definitions.get(name).and_then(|ids| ids.last()).copied()
    }

    /// Get the current shape for a name, or fail with UnknownShape.
    pub fn shape(&self, name: &str) -> RecordResult<&RecordShape> {
        self.get_shape_by_name(name)
            .ok_or_else(|| RecordError::UnknownShape(name.to_string()))
    }

    /// Get earlier definitions a name has shadowed, oldest first.
    pub fn shadowed(&self, name: &str) -> impl Iterator<Item = &RecordShape> + '_ {
        let ids = self.definitions.get(name).map(Vec::as_slice).unwrap_or(&[]);
        let earlier = ids.len().saturating_sub(1);
        ids[..earlier].iter().filter_map(|id| self.shapes.get(id))
    }

    /// Get all current shapes (shadowed shapes excluded).
    pub fn all_shapes(&self) -> impl Iterator<Item = &RecordShape> {
        self.definitions
            .values()
            .filter_map(|ids| ids.last())
            .filter_map(|id| self.shapes.get(id))
    }

    /// Get the number of names bound to a shape.
    pub fn shape_count(&self) -> usize {
        self.definitions.len()
    }

    // ==================== Records ====================

    /// Build a record of the current shape bound to `name`.
    pub fn instantiate(
        &self,
        name: &str,
        positional: Vec<Value>,
        named: Values,
    ) -> RecordResult<RecordInstance<'_>> {
        self.shape(name)?.instantiate(positional, named)
    }

    // ==================== Introspection ====================

    /// The declared fields of the current shape bound to `name`.
    pub fn fields_of(&self, name: &str) -> RecordResult<&[FieldSpec]> {
        Ok(self.shape(name)?.fields())
    }

    /// One metadata value of one field of the current shape bound to `name`.
    pub fn metadata_of(&self, name: &str, field: &str, key: &str) -> RecordResult<&Value> {
        self.shape(name)?.metadata_of(field, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegistryBuilder;
    use pretty_assertions::assert_eq;
    use rekord_core::values;

    fn registry_with_two_positions() -> (Registry, ShapeId, ShapeId) {
        let mut builder = RegistryBuilder::new();
        let first = builder
            .add_shape("Position")
            .field(FieldSpec::new("name").with_type("str"))
            .field(FieldSpec::new("lon").with_type("float").with_default(0.0))
            .field(FieldSpec::new("lat").with_type("float").with_default(0.0))
            .done()
            .unwrap();
        let second = builder
            .add_shape("Position")
            .field(FieldSpec::new("name"))
            .field(FieldSpec::new("lat"))
            .field(FieldSpec::new("lon"))
            .done()
            .unwrap();
        (builder.build(), first, second)
    }

    // ========== TEST: get_shape_by_name ==========
    #[test]
    fn test_get_shape_by_name() {
        // GIVEN registry with shape Card
        let mut builder = RegistryBuilder::new();
        builder
            .add_shape("Card")
            .field(FieldSpec::new("rank"))
            .field(FieldSpec::new("suit"))
            .done()
            .unwrap();
        let registry = builder.build();

        // WHEN get_shape_by_name("Card")
        let result = registry.get_shape_by_name("Card");

        // THEN returns the shape with name="Card"
        assert!(result.is_some());
        assert_eq!(result.unwrap().name(), "Card");
        assert_eq!(registry.shape_count(), 1);
    }

    // ========== TEST: get_shape_by_name_not_found ==========
    #[test]
    fn test_get_shape_by_name_not_found() {
        // GIVEN empty registry
        let registry = RegistryBuilder::new().build();

        // WHEN shape("NonExistent")
        let result = registry.shape("NonExistent");

        // THEN UnknownShape
        assert_eq!(
            result.unwrap_err(),
            RecordError::UnknownShape("NonExistent".into())
        );
    }

    // ========== TEST: shadowed_definitions ==========
    #[test]
    fn test_redefined_name_resolves_to_newest() {
        // GIVEN Position defined twice with different fields
        let (registry, first, second) = registry_with_two_positions();

        // WHEN looked up by name
        let current = registry.get_shape_by_name("Position").unwrap();

        // THEN the second definition wins and the first is still reachable
        assert_eq!(current.id(), second);
        assert_eq!(
            current.field_names().collect::<Vec<_>>(),
            vec!["name", "lat", "lon"]
        );
        assert_eq!(registry.get_shape(first).unwrap().arity(), 3);
        assert_eq!(
            registry.shadowed("Position").map(|s| s.id()).collect::<Vec<_>>(),
            vec![first]
        );
        assert_eq!(registry.all_shapes().count(), 1);
    }

    // ========== TEST: instantiate_by_name ==========
    #[test]
    fn test_instantiate_uses_current_definition() {
        let (registry, _, second) = registry_with_two_positions();

        // WHEN instantiate("Position", ["Vancouver", -123.1, 49.3])
        let record = registry
            .instantiate(
                "Position",
                vec!["Vancouver".into(), (-123.1).into(), 49.3.into()],
                values!(),
            )
            .unwrap();

        // THEN the values bind to the newest field order
        assert_eq!(record.shape().id(), second);
        assert_eq!(record.to_string(), "Position(name=Vancouver, lat=-123.1, lon=49.3)");
    }

    #[test]
    fn test_newest_definition_has_no_defaults() {
        let (registry, _, _) = registry_with_two_positions();

        let result = registry.instantiate("Position", vec!["Null Island".into()], values!());

        assert_eq!(
            result.unwrap_err(),
            RecordError::missing_value("Position", "lat")
        );
    }

    #[test]
    fn test_introspection_by_name() {
        let mut builder = RegistryBuilder::new();
        builder
            .add_shape("Position")
            .field(FieldSpec::new("name"))
            .field(FieldSpec::new("lon").with_default(0.0))
            .field(FieldSpec::new("lat").with_default(0.0))
            .add_metadata("lon", "unit", "degrees")
            .add_metadata("lat", "unit", "degrees")
            .done()
            .unwrap();
        let registry = builder.build();

        assert_eq!(registry.fields_of("Position").unwrap().len(), 3);
        assert_eq!(
            registry.metadata_of("Position", "lat", "unit"),
            Ok(&Value::from("degrees"))
        );
        assert_eq!(
            registry.metadata_of("Position", "name", "unit").unwrap_err(),
            RecordError::unknown_metadata_key("name", "unit")
        );
        assert!(registry.fields_of("Card").is_err());
    }
}
