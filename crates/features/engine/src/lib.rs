//! # Resolution Engine
//!
//! Computes the complete field set for a production call and hands it to the
//! model's construction entry point.
//!
//! For every call the engine:
//! 1. looks the model up (failing with `NotRegistered`),
//! 2. orders its fields ([`ordering::processing_order`]),
//! 3. walks them, starting from the override or the static default and applying
//!    derived values that are present,
//! 4. merges the overrides once more so they always win,
//! 5. calls [`Model::construct`].
//!
//! ## Example
//!
//! ```rust,ignore
//! let registry = ModelRegistry::new();
//! registry.register_model::<User>()?;
//!
//! let users = Engine::new(&registry).factory::<User>()?;
//! let admin = users.build_with(Overrides::new().set("role", "admin"))?;
//! ```

mod factory;
pub mod ordering;
pub mod resolver;

pub use crate::factory::Factory;
pub use crate::ordering::processing_order;
pub use crate::resolver::resolve_fields;

use fixtura_domain::{FactoryConfig, FieldSet, Overrides};
use fixtura_registry::{FactoryError, Model, ModelRegistry};
use tracing::debug;

/// Production front-end bound to one registry.
#[derive(Debug, Clone)]
pub struct Engine<'r> {
    registry: &'r ModelRegistry,
    config: FactoryConfig,
}

impl<'r> Engine<'r> {
    #[must_use]
    pub fn new(registry: &'r ModelRegistry) -> Self {
        Self { registry, config: FactoryConfig::default() }
    }

    #[must_use]
    pub fn with_config(mut self, config: FactoryConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &FactoryConfig {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &'r ModelRegistry {
        self.registry
    }

    /// Selects `M` and returns its reusable production function.
    ///
    /// # Errors
    /// [`FactoryError::NotRegistered`] when `M` was never registered,
    /// [`FactoryError::CyclicDerivation`] in topological mode.
    pub fn factory<M: Model>(&self) -> Result<Factory<M>, FactoryError> {
        let entry = self.registry.lookup(M::model_id().as_str())?;
        Factory::new(entry, self.config.clone())
    }

    /// One-shot production of `M`.
    ///
    /// # Errors
    /// See [`Engine::factory`] and [`Factory::build_with`].
    pub fn produce<M: Model>(&self, overrides: impl Into<Overrides>) -> Result<M, FactoryError> {
        self.factory::<M>()?.build_with(overrides)
    }

    /// Resolves the field set of a model known only by identifier.
    ///
    /// # Errors
    /// [`FactoryError::NotRegistered`] and the resolution errors of [`resolve_fields`].
    pub fn resolve(&self, model_id: &str, overrides: &Overrides) -> Result<FieldSet, FactoryError> {
        let entry = self.registry.lookup(model_id)?;
        let order = processing_order(&entry, self.config.ordering)?;
        debug!(model = %entry.id(), "Resolving fields");
        resolve_fields(&entry, &order, overrides, &self.config)
    }

    /// Resolves a model by identifier and builds it with an ad-hoc construction entry point.
    ///
    /// # Errors
    /// Resolution errors, then whatever `construct` returns.
    pub fn produce_with<T, F>(
        &self,
        model_id: &str,
        overrides: &Overrides,
        construct: F,
    ) -> Result<T, FactoryError>
    where
        F: FnOnce(FieldSet) -> Result<T, FactoryError>,
    {
        construct(self.resolve(model_id, overrides)?)
    }
}
