use crate::blueprint::Blueprint;
use crate::error::{FactoryError, FactoryErrorExt};
use fixtura_domain::{FieldSet, ModelId, Value};
use serde::de::DeserializeOwned;

/// A type the factory can produce.
///
/// Implementors supply the two collaborators the engine needs: the registration
/// data ([`Model::blueprint`]) and the construction entry point ([`Model::construct`]).
/// `#[derive(Model)]` generates both from field attributes.
pub trait Model: Sized {
    /// Registry key. Defaults to the type's short name.
    fn model_id() -> ModelId {
        ModelId::of::<Self>()
    }

    /// Field defaults and options registered for this model.
    fn blueprint() -> Result<Blueprint, FactoryError>;

    /// Builds an instance from a complete, resolved field set.
    fn construct(fields: FieldSet) -> Result<Self, FactoryError>;
}

/// Construction entry point for any `Deserialize` type.
///
/// # Errors
/// [`FactoryError::Serde`] when the field set does not match the target type.
pub fn construct_with_serde<T: DeserializeOwned>(fields: FieldSet) -> Result<T, FactoryError> {
    serde_json::from_value(Value::Object(fields))
        .context(format!("constructing '{}'", ModelId::of::<T>()))
}
