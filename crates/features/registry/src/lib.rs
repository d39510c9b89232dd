//! # Model Registry
//!
//! Storage side of the fixture factory: what a model registers and where it is kept.
//!
//! * [`Blueprint`]: field defaults in declaration order plus per-field [`FieldOptions`].
//! * [`DependsOn`]: the only field option, a derivation over other fields' resolved values.
//! * [`ModelRegistry`]: `ModelId -> ModelEntry` map, last registration wins.
//! * [`Model`]: the contract a producible type fulfils (registration data and construction).
//!
//! Resolution itself lives in `fixtura-engine`.

pub mod blueprint;
pub mod derivation;
mod error;
pub mod model;
pub mod registry;

pub use crate::blueprint::{Blueprint, FieldOptions, OptionsMap};
pub use crate::derivation::{Derivation, DerivationError, DerivationErrorExt, DependsOn, Inputs, IntoDerived};
pub use crate::error::{FactoryError, FactoryErrorExt};
pub use crate::model::{Model, construct_with_serde};
pub use crate::registry::{ModelEntry, ModelRegistry};
