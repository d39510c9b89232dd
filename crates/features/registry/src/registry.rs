//! Model registry.
//!
//! Lifecycle: populate once per model (usually at test-suite start), then read.
//! Entries are immutable once stored; re-registration swaps in a new entry and
//! never touches factories already holding the old one.

use crate::blueprint::{Blueprint, FieldOptions, OptionsMap};
use crate::error::FactoryError;
use crate::model::Model;
use fixtura_domain::{FieldName, FieldSet, ModelId};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything registered for one model.
#[derive(Debug, Clone)]
pub struct ModelEntry {
    id: ModelId,
    defaults: FieldSet,
    options: OptionsMap,
}

impl ModelEntry {
    #[must_use]
    pub fn new(id: ModelId, blueprint: Blueprint) -> Self {
        let (defaults, options) = blueprint.into_parts();
        Self { id, defaults, options }
    }

    #[must_use]
    pub const fn id(&self) -> &ModelId {
        &self.id
    }

    /// Static defaults in declaration order.
    #[must_use]
    pub const fn defaults(&self) -> &FieldSet {
        &self.defaults
    }

    #[must_use]
    pub fn options(&self, field: &str) -> Option<&FieldOptions> {
        self.options.get(field)
    }

    /// Registered field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &FieldName> {
        self.defaults.keys()
    }

    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.defaults.contains_key(field)
    }
}

/// Process-wide store of registered models.
///
/// Construct one per test suite for isolation, or use the shared instance
/// exposed by the `fixtura` facade.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    entries: RwLock<FxHashMap<ModelId, Arc<ModelEntry>>>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the entry for `id`, replacing any previous one (last write wins).
    ///
    /// Returns the replaced entry, if any.
    pub fn register(
        &self,
        id: impl Into<ModelId>,
        defaults: FieldSet,
        options: impl IntoIterator<Item = (FieldName, FieldOptions)>,
    ) -> Option<Arc<ModelEntry>> {
        self.register_blueprint(id, Blueprint::from_parts(defaults, options))
    }

    /// Same as [`ModelRegistry::register`] with a prepared [`Blueprint`].
    pub fn register_blueprint(
        &self,
        id: impl Into<ModelId>,
        blueprint: Blueprint,
    ) -> Option<Arc<ModelEntry>> {
        let id = id.into();
        let entry = Arc::new(ModelEntry::new(id.clone(), blueprint));
        let fields = entry.defaults.len();
        let derived = entry.options.values().filter(|o| o.depends_on.is_some()).count();

        for (field, options) in &entry.options {
            let Some(depends_on) = &options.depends_on else { continue };
            for reference in depends_on.fields() {
                if !entry.has_field(reference) {
                    warn!(model = %id, field = %field, reference = %reference,
                        "Derivation references a field without a default");
                }
            }
        }

        let previous = self.entries.write().insert(id.clone(), entry);
        if previous.is_some() {
            warn!(model = %id, fields, derived, "Model re-registered, replacing previous entry");
        } else {
            info!(model = %id, fields, derived, "Model registered");
        }
        previous
    }

    /// Registers `M` under [`Model::model_id`] using its [`Model::blueprint`].
    ///
    /// # Errors
    /// Propagates blueprint construction errors (e.g. unserializable defaults).
    pub fn register_model<M: Model>(&self) -> Result<Option<Arc<ModelEntry>>, FactoryError> {
        Ok(self.register_blueprint(M::model_id(), M::blueprint()?))
    }

    /// Returns the entry registered for `id`.
    ///
    /// # Errors
    /// [`FactoryError::NotRegistered`] naming `id` when nothing was registered under it.
    pub fn lookup(&self, id: &str) -> Result<Arc<ModelEntry>, FactoryError> {
        self.entries.read().get(id).cloned().ok_or_else(|| FactoryError::not_registered(id))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.read().contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Registered identifiers, sorted.
    #[must_use]
    pub fn model_ids(&self) -> Vec<ModelId> {
        let mut ids: Vec<_> = self.entries.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::{DependsOn, Inputs};
    use serde_json::json;

    fn user_blueprint(name: &str) -> Blueprint {
        Blueprint::new().field("id", "u-1").field("name", name)
    }

    #[test]
    fn test_registry_creation() {
        let registry = ModelRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.model_ids().is_empty());
    }

    #[test]
    fn lookup_returns_registered_entry() {
        let registry = ModelRegistry::new();
        registry.register_blueprint("User", user_blueprint("alice"));

        let entry = registry.lookup("User").unwrap();
        assert_eq!(entry.id().as_str(), "User");
        assert_eq!(entry.defaults().get("name"), Some(&json!("alice")));
        assert!(registry.contains("User"));
    }

    #[test]
    fn lookup_of_unknown_model_names_it() {
        let registry = ModelRegistry::new();
        let err = registry.lookup("Ghost").unwrap_err();
        assert_eq!(err.unregistered_model().map(ModelId::as_str), Some("Ghost"));
    }

    #[test]
    fn last_registration_wins() {
        let registry = ModelRegistry::new();
        assert!(registry.register_blueprint("User", user_blueprint("alice")).is_none());
        let previous = registry.register_blueprint("User", user_blueprint("bob")).unwrap();

        assert_eq!(previous.defaults().get("name"), Some(&json!("alice")));
        assert_eq!(registry.lookup("User").unwrap().defaults().get("name"), Some(&json!("bob")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn raw_register_keeps_options_of_known_fields() {
        let registry = ModelRegistry::new();
        let mut defaults = FieldSet::new();
        defaults.insert("id".to_owned(), json!("x"));
        defaults.insert("slug".to_owned(), json!("y"));
        let options = vec![(
            "slug".to_owned(),
            FieldOptions::depends_on(DependsOn::new(["id"], |i: &Inputs<'_>| i.text("id"))),
        )];

        registry.register("Post", defaults, options);
        let entry = registry.lookup("Post").unwrap();
        assert_eq!(entry.options("slug").map(FieldOptions::reference_count), Some(1));
        assert!(entry.options("id").is_none());
        let names: Vec<_> = entry.field_names().map(String::as_str).collect();
        assert_eq!(names, ["id", "slug"]);
    }

    #[test]
    fn model_ids_are_sorted() {
        let registry = ModelRegistry::new();
        registry.register_blueprint("b", Blueprint::new());
        registry.register_blueprint("a", Blueprint::new());
        let ids: Vec<_> = registry.model_ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, ["a", "b"]);
    }
}
