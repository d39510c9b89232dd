use crate::derivation::DerivationError;
use fixtura_domain::{FieldName, ModelId};
use fixtura_kernel::config::ConfigError;
use std::borrow::Cow;

/// Errors surfaced by registration and production calls.
#[fixtura_derive::fixtura_error]
pub enum FactoryError {
    /// No entry exists for the requested model identifier.
    #[error(
        "'{model}' is not a registered factory model, register it before producing{}",
        format_context(.context)
    )]
    NotRegistered { model: ModelId, context: Option<Cow<'static, str>> },

    /// A derivation function failed; the original error is kept as the source.
    #[error("Derivation failed{}: {source}", format_context(.context))]
    Derivation { source: DerivationError, context: Option<Cow<'static, str>> },

    /// A value could not be converted to or from JSON (defaults, overrides, construction).
    #[error("Serde error{}: {source}", format_context(.context))]
    Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The factory configuration could not be loaded.
    #[error("Factory configuration error{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    /// Two or more derived fields reference each other.
    #[error("Field '{field}' of '{model}' is part of a derivation cycle{}", format_context(.context))]
    CyclicDerivation { model: ModelId, field: FieldName, context: Option<Cow<'static, str>> },

    /// An override names a field the model never registered.
    #[error("'{model}' has no registered field '{field}'{}", format_context(.context))]
    UnknownField { model: ModelId, field: FieldName, context: Option<Cow<'static, str>> },

    /// Internal fallback, also used by hand-written construction entry points.
    #[error("Internal factory error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl FactoryError {
    pub(crate) fn not_registered(model: impl Into<ModelId>) -> Self {
        Self::NotRegistered { model: model.into(), context: None }
    }

    /// The unregistered model, when this is a [`FactoryError::NotRegistered`].
    #[must_use]
    pub const fn unregistered_model(&self) -> Option<&ModelId> {
        match self {
            Self::NotRegistered { model, .. } => Some(model),
            _ => None,
        }
    }
}
