//! Facade crate for the fixture factory.
//! Re-exports the registry, the resolution engine and the derive macro, and owns
//! the process-wide registry used by [`register`] and [`factory`].
//! Keep this crate thin: it should compose other crates, not implement resolution logic.
//!
//! ## Usage
//!
//! ```rust
//! use fixtura::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize, Model)]
//! struct Account {
//!     #[fixture(default = "default id")]
//!     id: String,
//!     #[fixture(default = "default name")]
//!     name: String,
//!     #[fixture(default = "", depends_on(id, name), with = handle)]
//!     handle: String,
//! }
//!
//! fn handle(inputs: &Inputs<'_>) -> String {
//!     format!("{}@{}", inputs.text("name"), inputs.text("id"))
//! }
//!
//! fixtura::register::<Account>()?;
//! let account = fixtura::factory::<Account>()?.build_with(Overrides::new().set("name", "ann"))?;
//! assert_eq!(account.handle, "ann@default id");
//! # Ok::<(), FactoryError>(())
//! ```

use std::sync::LazyLock;

pub use fixtura_derive::Model;
pub use fixtura_domain::{
    DependencyOrdering, FactoryConfig, FieldName, FieldSet, ModelId, Overrides, Value, is_present,
};
pub use fixtura_engine::{Engine, Factory};
pub use fixtura_kernel::config::{ConfigError, load_config, load_factory_config};
pub use fixtura_logger as logger;
pub use fixtura_registry::{
    Blueprint, DependsOn, DerivationError, DerivationErrorExt, FactoryError, FactoryErrorExt,
    Inputs, IntoDerived, Model, ModelEntry, ModelRegistry, construct_with_serde,
};
pub use serde_json::json;

/// Everything a fixture module usually needs.
pub mod prelude {
    pub use crate::{
        DependsOn, Factory, FactoryConfig, FactoryError, Inputs, Model, Overrides, factory,
        register,
    };
}

static REGISTRY: LazyLock<ModelRegistry> = LazyLock::new(ModelRegistry::new);

/// The process-wide registry shared by [`register`] and [`factory`].
#[must_use]
pub fn registry() -> &'static ModelRegistry {
    &REGISTRY
}

/// Registers `M` in the process-wide registry, replacing an earlier registration.
///
/// # Errors
/// Returns [`FactoryError::Serde`] when a declared default cannot be serialized.
pub fn register<M: Model>() -> Result<(), FactoryError> {
    REGISTRY.register_model::<M>().map(|_| ())
}

/// Selects the factory of `M` from the process-wide registry.
///
/// # Errors
/// [`FactoryError::NotRegistered`] when `M` was never registered.
pub fn factory<M: Model>() -> Result<Factory<M>, FactoryError> {
    factory_with(FactoryConfig::default())
}

/// Like [`factory`], with an explicit engine configuration.
///
/// # Errors
/// [`FactoryError::NotRegistered`], and [`FactoryError::CyclicDerivation`] in topological mode.
pub fn factory_with<M: Model>(config: FactoryConfig) -> Result<Factory<M>, FactoryError> {
    Engine::new(&REGISTRY).with_config(config).factory()
}

/// Selects the factory of `M` using the layered configuration from [`load_factory_config`].
///
/// # Errors
/// Loader failures surface as [`FactoryError::Config`] with the loader error as the source.
pub fn factory_from_env<M: Model>() -> Result<Factory<M>, FactoryError> {
    let config = load_factory_config(None::<&str>).context("loading factory config")?;
    factory_with(config)
}
