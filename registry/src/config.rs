//! JSON shape declarations.
//!
//! ```json
//! {
//!   "policy": "positional",
//!   "shapes": [
//!     { "name": "Card", "fields": ["rank", "suit"] },
//!     { "name": "Position", "fields": [
//!         { "name": "name", "type": "str" },
//!         { "name": "lat", "type": "float", "default": 0.0, "metadata": { "unit": "degrees" } }
//!     ] }
//!   ]
//! }
//! ```

use crate::{FieldSpec, OrderingPolicy, RegistryBuilder, RegistryError};
use log::debug;
use rekord_core::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A set of shape declarations plus the ordering policy to define them under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub policy: OrderingPolicy,
    pub shapes: Vec<ShapeDecl>,
}

/// One declared shape. Later declarations of a name shadow earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDecl {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

/// A declared field: a bare name, or a name with type, default and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldDecl {
    Name(String),
    Full {
        name: String,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        type_hint: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<Value>,
        #[serde(default, skip_serializing_if = "HashMap::is_empty")]
        metadata: HashMap<String, Value>,
    },
}

impl From<FieldDecl> for FieldSpec {
    fn from(decl: FieldDecl) -> Self {
        match decl {
            FieldDecl::Name(name) => FieldSpec::new(name),
            FieldDecl::Full {
                name,
                type_hint,
                default,
                metadata,
            } => FieldSpec {
                name,
                type_hint,
                default,
                metadata,
            },
        }
    }
}

impl RegistryConfig {
    /// Parse declarations from a JSON document.
    pub fn from_json(source: &str) -> Result<Self, RegistryError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Read and parse declarations from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        debug!("reading shape declarations from {}", path.display());
        let source = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    /// Define every declared shape into a fresh builder.
    pub fn to_builder(&self) -> Result<RegistryBuilder, RegistryError> {
        Ok(RegistryBuilder::from_config(self)?)
    }
}
