//! # Domain Types
//!
//! This crate contains the plain data shared by the registry and the resolution engine.
//! Keep it lean: no I/O, no global state, no resolution logic.

pub mod config;
pub mod fields;
pub mod model_id;

pub use crate::config::{DependencyOrdering, FactoryConfig};
pub use crate::fields::{FieldName, FieldSet, Overrides, is_present};
pub use crate::model_id::ModelId;
pub use serde_json::Value;
