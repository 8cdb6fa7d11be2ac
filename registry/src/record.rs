//! Record instances built from a shape.

use crate::RecordShape;
use log::trace;
use rekord_core::{RecordError, RecordResult, Value, Values};
use std::fmt;

/// A concrete record built from a shape and bound values.
///
/// The record borrows its shape, so the shape always outlives it.
#[derive(Debug, Clone)]
pub struct RecordInstance<'s> {
    shape: &'s RecordShape,
    /// One value per field, in declared order.
    values: Vec<Value>,
}

impl RecordShape {
    /// Build a record.
    ///
    /// Positional values bind left to right in declared order, named values
    /// bind by field name, and anything left unbound takes its default.
    pub fn instantiate(
        &self,
        positional: Vec<Value>,
        named: Values,
    ) -> RecordResult<RecordInstance<'_>> {
        let fields = self.fields();
        if positional.len() > fields.len() {
            return Err(RecordError::TooManyValues {
                shape: self.name().to_string(),
                expected: fields.len(),
                provided: positional.len(),
            });
        }

        let mut slots: Vec<Option<Value>> = positional.into_iter().map(Some).collect();
        slots.resize(fields.len(), None);

        // Sorted so the reported error does not depend on hash order.
        let mut named: Vec<(String, Value)> = named.into_iter().collect();
        named.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, value) in named {
            let index = self
                .field_index(&name)
                .ok_or_else(|| RecordError::unknown_field(self.name(), &name))?;
            if slots[index].is_some() {
                return Err(RecordError::duplicate_binding(self.name(), name));
            }
            slots[index] = Some(value);
        }

        let values = fields
            .iter()
            .zip(slots)
            .map(|(field, slot)| {
                slot.or_else(|| field.default.clone())
                    .ok_or_else(|| RecordError::missing_value(self.name(), &field.name))
            })
            .collect::<RecordResult<Vec<_>>>()?;

        trace!("instantiated {} ({})", self.name(), self.id());
        Ok(RecordInstance {
            shape: self,
            values,
        })
    }

    /// Build a record from positional values only.
    pub fn positional(&self, values: Vec<Value>) -> RecordResult<RecordInstance<'_>> {
        self.instantiate(values, Values::new())
    }

    /// Build a record from named values only.
    pub fn named(&self, values: Values) -> RecordResult<RecordInstance<'_>> {
        self.instantiate(Vec::new(), values)
    }
}

impl<'s> RecordInstance<'s> {
    pub fn shape(&self) -> &'s RecordShape {
        self.shape
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.shape
            .field_index(name)
            .and_then(|index| self.values.get(index))
    }

    /// Get a field value by declared position.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// All values in declared field order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consume the record into its values, in declared field order.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Iterate over (field name, value) pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.shape.field_names().zip(self.values.iter())
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A new record of the same shape with some fields replaced.
    pub fn replace(&self, named: Values) -> RecordResult<RecordInstance<'s>> {
        let mut values = self.values.clone();
        let mut named: Vec<(String, Value)> = named.into_iter().collect();
        named.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, value) in named {
            let index = self
                .shape
                .field_index(&name)
                .ok_or_else(|| RecordError::unknown_field(self.shape.name(), &name))?;
            values[index] = value;
        }
        Ok(RecordInstance {
            shape: self.shape,
            values,
        })
    }

    /// Equal iff both records share the same shape identity and every
    /// field value compares equal in declared order.
    pub fn equals(&self, other: &RecordInstance<'_>) -> bool {
        self.shape.id() == other.shape.id()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a == b)
    }
}

impl PartialEq for RecordInstance<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for RecordInstance<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.shape.name())?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, ")")
    }
}
