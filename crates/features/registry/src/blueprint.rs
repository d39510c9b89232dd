//! Registration input: per-field defaults plus per-field options.

use crate::derivation::DependsOn;
use crate::error::{FactoryError, FactoryErrorExt};
use fixtura_domain::{FieldName, FieldSet, Value};
use fxhash::FxHashMap;
use serde::Serialize;

/// Optional per-field metadata.
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    pub depends_on: Option<DependsOn>,
}

impl FieldOptions {
    #[must_use]
    pub const fn depends_on(depends_on: DependsOn) -> Self {
        Self { depends_on: Some(depends_on) }
    }

    /// Number of referenced fields; zero when no derivation is declared.
    #[must_use]
    pub fn reference_count(&self) -> usize {
        self.depends_on.as_ref().map_or(0, |d| d.fields().len())
    }
}

/// Field option mapping as stored in a registered entry.
pub type OptionsMap = FxHashMap<FieldName, FieldOptions>;

/// Declarative description of a model's defaults, built once at registration time.
///
/// Fields keep the order in which they were declared.
///
/// ```rust,ignore
/// let blueprint = Blueprint::new()
///     .field("id", "default id")
///     .field("name", "default name")
///     .derived(
///         "other",
///         "default value",
///         DependsOn::new(["id", "name"], |inputs: &Inputs<'_>| {
///             format!("{} and {}", inputs.text("id"), inputs.text("name"))
///         }),
///     );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Blueprint {
    defaults: FieldSet,
    options: OptionsMap,
}

impl Blueprint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a blueprint from raw mappings.
    ///
    /// Options for names that have no default are dropped, since only fields with a
    /// default take part in resolution.
    #[must_use]
    pub fn from_parts(
        defaults: FieldSet,
        options: impl IntoIterator<Item = (FieldName, FieldOptions)>,
    ) -> Self {
        let options = options
            .into_iter()
            .filter(|(name, _)| {
                let known = defaults.contains_key(name);
                if !known {
                    tracing::debug!(field = %name, "Dropping options for a field without a default");
                }
                known
            })
            .collect();
        Self { defaults, options }
    }

    /// Registers a field with a static default.
    ///
    /// Re-declaring a derived field this way drops its derivation.
    #[must_use]
    pub fn field(mut self, name: impl Into<FieldName>, default: impl Into<Value>) -> Self {
        let name = name.into();
        self.options.remove(&name);
        self.defaults.insert(name, default.into());
        self
    }

    /// Registers a field whose default is computed from other fields.
    #[must_use]
    pub fn derived(
        mut self,
        name: impl Into<FieldName>,
        default: impl Into<Value>,
        depends_on: DependsOn,
    ) -> Self {
        let name = name.into();
        self.options.insert(name.clone(), FieldOptions::depends_on(depends_on));
        self.defaults.insert(name, default.into());
        self
    }

    /// Like [`Blueprint::field`] for any serializable default.
    ///
    /// # Errors
    /// [`FactoryError::Serde`] when the default cannot be represented as JSON.
    pub fn try_field(
        self,
        name: impl Into<FieldName>,
        default: impl Serialize,
    ) -> Result<Self, FactoryError> {
        let name = name.into();
        let value = to_default(&name, default)?;
        Ok(self.field(name, value))
    }

    /// Like [`Blueprint::derived`] for any serializable default.
    ///
    /// # Errors
    /// [`FactoryError::Serde`] when the default cannot be represented as JSON.
    pub fn try_derived(
        self,
        name: impl Into<FieldName>,
        default: impl Serialize,
        depends_on: DependsOn,
    ) -> Result<Self, FactoryError> {
        let name = name.into();
        let value = to_default(&name, default)?;
        Ok(self.derived(name, value, depends_on))
    }

    #[must_use]
    pub const fn defaults(&self) -> &FieldSet {
        &self.defaults
    }

    #[must_use]
    pub const fn options(&self) -> &OptionsMap {
        &self.options
    }

    #[must_use]
    pub fn into_parts(self) -> (FieldSet, OptionsMap) {
        (self.defaults, self.options)
    }
}

fn to_default(name: &str, default: impl Serialize) -> Result<Value, FactoryError> {
    serde_json::to_value(default).context(format!("serializing default of field '{name}'"))
}
