use crate::ordering::processing_order;
use crate::resolver::resolve_fields;
use fixtura_domain::{FactoryConfig, FieldName, FieldSet, ModelId, Overrides};
use fixtura_registry::{FactoryError, Model, ModelEntry};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Reusable production function for one model.
///
/// Holds a snapshot of the registered entry and its processing order, both
/// computed once when the factory is selected. Re-registering the model later
/// does not affect existing factories.
pub struct Factory<M> {
    entry: Arc<ModelEntry>,
    order: Arc<[FieldName]>,
    config: FactoryConfig,
    model: PhantomData<fn() -> M>,
}

impl<M: Model> Factory<M> {
    pub(crate) fn new(entry: Arc<ModelEntry>, config: FactoryConfig) -> Result<Self, FactoryError> {
        let order = processing_order(&entry, config.ordering)?;
        debug!(model = %entry.id(), order = ?order, "Factory selected");
        Ok(Self { entry, order: order.into(), config, model: PhantomData })
    }

    /// Produces an instance using only registered defaults and derivations.
    ///
    /// # Errors
    /// Derivation and construction failures; no partial instance is returned.
    pub fn build(&self) -> Result<M, FactoryError> {
        self.build_with(Overrides::new())
    }

    /// Produces an instance with `overrides` taking precedence over everything else.
    ///
    /// # Errors
    /// Derivation and construction failures, plus [`FactoryError::UnknownField`]
    /// in strict mode.
    pub fn build_with(&self, overrides: impl Into<Overrides>) -> Result<M, FactoryError> {
        let fields = self.fields_with(overrides)?;
        debug!(model = %self.entry.id(), fields = fields.len(), "Constructing instance");
        M::construct(fields)
    }

    /// Produces `count` instances, each with the same overrides.
    ///
    /// # Errors
    /// Stops at the first failure.
    pub fn build_many(
        &self,
        count: usize,
        overrides: impl Into<Overrides>,
    ) -> Result<Vec<M>, FactoryError> {
        let overrides = overrides.into();
        (0..count).map(|_| self.build_with(overrides.clone())).collect()
    }
}

impl<M> Factory<M> {
    /// The resolved field set that would be handed to the construction entry point.
    ///
    /// # Errors
    /// Same as [`Factory::build_with`] minus construction.
    pub fn fields_with(&self, overrides: impl Into<Overrides>) -> Result<FieldSet, FactoryError> {
        resolve_fields(&self.entry, &self.order, &overrides.into(), &self.config)
    }

    #[must_use]
    pub fn model_id(&self) -> &ModelId {
        self.entry.id()
    }

    /// Field processing order.
    #[must_use]
    pub fn order(&self) -> &[FieldName] {
        &self.order
    }

    #[must_use]
    pub const fn config(&self) -> &FactoryConfig {
        &self.config
    }
}

impl<M> Clone for Factory<M> {
    fn clone(&self) -> Self {
        Self {
            entry: Arc::clone(&self.entry),
            order: Arc::clone(&self.order),
            config: self.config.clone(),
            model: PhantomData,
        }
    }
}

impl<M> fmt::Debug for Factory<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("model", self.entry.id())
            .field("order", &self.order)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
