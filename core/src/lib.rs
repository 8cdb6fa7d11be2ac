//! Rekord Core Types
//!
//! This crate provides the foundational types shared by the record registry:
//! - Shape identity (ShapeId)
//! - Value types (the Value enum stored in record fields and metadata)
//! - The record error kinds

mod error;
mod id;
mod value;

pub use error::*;
pub use id::*;
pub use value::*;
