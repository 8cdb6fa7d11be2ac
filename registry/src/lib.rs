//! Rekord Registry
//!
//! Record shapes defined at runtime from ordered field lists, records built
//! from them, and introspection over their fields. A shape is immutable once
//! defined; the registry is immutable once built via RegistryBuilder.

mod builder;
mod config;
mod record;
mod registry;
mod types;

pub use builder::{
    OrderingPolicy, RegistryBuilder, RegistryError, RegistryShapeBuilder, ShapeBuilder,
};
pub use config::{FieldDecl, RegistryConfig, ShapeDecl};
pub use record::RecordInstance;
pub use registry::Registry;
pub use types::*;
