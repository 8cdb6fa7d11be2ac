//! Identity types for record shapes.
//!
//! A shape id is:
//! - Unique within the process
//! - Immutable once assigned
//! - Never reused, even when a shape name is redefined

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_SHAPE_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a record shape.
///
/// Two shapes with the same name and the same field layout still carry
/// different ids; record equality is keyed on this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u32);

impl ShapeId {
    /// Allocate a fresh id.
    pub fn fresh() -> Self {
        Self(NEXT_SHAPE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw value.
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}
