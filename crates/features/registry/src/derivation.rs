//! Derived defaults: a field computed from other fields' resolved values.

use fixtura_domain::{FieldName, FieldSet, Value};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Error raised by a derivation function.
#[fixtura_derive::fixtura_error]
pub enum DerivationError {
    /// A referenced value could not be decoded.
    #[error("Derivation input error{}: {source}", format_context(.context))]
    Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Derivation error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Read-only view of the referenced fields handed to a derivation function.
///
/// A reference that has not been resolved yet in the current walk is kept
/// with no value, so [`Inputs::get`] returns `None` for it.
#[derive(Debug, Clone)]
pub struct Inputs<'a> {
    entries: Vec<(&'a str, Option<&'a Value>)>,
}

impl<'a> Inputs<'a> {
    /// Captures the current values of `fields` from a partially resolved set.
    #[must_use]
    pub fn capture(fields: &'a [FieldName], resolved: &'a FieldSet) -> Self {
        Self { entries: fields.iter().map(|name| (name.as_str(), resolved.get(name))).collect() }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.entries.iter().find(|(name, _)| *name == field).and_then(|(_, value)| *value)
    }

    #[must_use]
    pub fn is_resolved(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// The value as a string slice, if it is a JSON string.
    #[must_use]
    pub fn str(&self, field: &str) -> Option<&'a str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Renders the value for interpolation.
    ///
    /// Strings are returned verbatim, other values as JSON, and unresolved
    /// references as `undefined`.
    #[must_use]
    pub fn text(&self, field: &str) -> String {
        match self.get(field) {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => "undefined".to_owned(),
        }
    }

    /// Deserializes a referenced value.
    ///
    /// # Errors
    /// [`DerivationError::Internal`] when the field is unresolved,
    /// [`DerivationError::Serde`] when it has an incompatible shape.
    pub fn decode<T: DeserializeOwned>(&self, field: &str) -> Result<T, DerivationError> {
        let Some(value) = self.get(field) else {
            return Err(format!("field '{field}' has no resolved value").into());
        };
        serde_json::from_value(value.clone()).context(format!("decoding field '{field}'"))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Option<&'a Value>)> + '_ {
        self.entries.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Conversion of a derivation's return value.
///
/// `None` (or a falsy JSON value, see [`fixtura_domain::is_present`]) defers to the static default.
pub trait IntoDerived {
    fn into_derived(self) -> Result<Option<Value>, DerivationError>;
}

impl IntoDerived for Value {
    fn into_derived(self) -> Result<Option<Value>, DerivationError> {
        Ok(Some(self))
    }
}

impl IntoDerived for String {
    fn into_derived(self) -> Result<Option<Value>, DerivationError> {
        Ok(Some(Value::String(self)))
    }
}

impl IntoDerived for &str {
    fn into_derived(self) -> Result<Option<Value>, DerivationError> {
        Ok(Some(Value::from(self)))
    }
}

impl IntoDerived for bool {
    fn into_derived(self) -> Result<Option<Value>, DerivationError> {
        Ok(Some(Value::Bool(self)))
    }
}

impl IntoDerived for i64 {
    fn into_derived(self) -> Result<Option<Value>, DerivationError> {
        Ok(Some(Value::from(self)))
    }
}

impl IntoDerived for f64 {
    fn into_derived(self) -> Result<Option<Value>, DerivationError> {
        Ok(Some(Value::from(self)))
    }
}

impl IntoDerived for () {
    fn into_derived(self) -> Result<Option<Value>, DerivationError> {
        Ok(None)
    }
}

impl<T: IntoDerived> IntoDerived for Option<T> {
    fn into_derived(self) -> Result<Option<Value>, DerivationError> {
        self.map_or(Ok(None), IntoDerived::into_derived)
    }
}

impl<T, E> IntoDerived for Result<T, E>
where
    T: IntoDerived,
    E: Into<DerivationError>,
{
    fn into_derived(self) -> Result<Option<Value>, DerivationError> {
        self.map_err(Into::into)?.into_derived()
    }
}

type DeriveFn = dyn Fn(&Inputs<'_>) -> Result<Option<Value>, DerivationError> + Send + Sync;

/// A shareable derivation function.
#[derive(Clone)]
pub struct Derivation(Arc<DeriveFn>);

impl Derivation {
    pub fn new<F, R>(derive: F) -> Self
    where
        F: Fn(&Inputs<'_>) -> R + Send + Sync + 'static,
        R: IntoDerived,
    {
        Self(Arc::new(move |inputs: &Inputs<'_>| derive(inputs).into_derived()))
    }

    /// # Errors
    /// Whatever the wrapped function returns.
    pub fn call(&self, inputs: &Inputs<'_>) -> Result<Option<Value>, DerivationError> {
        (self.0)(inputs)
    }
}

impl fmt::Debug for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Derivation(..)")
    }
}

/// The `dependsOn` option: referenced fields followed by the function computing the value.
#[derive(Debug, Clone)]
pub struct DependsOn {
    fields: Vec<FieldName>,
    derivation: Derivation,
}

impl DependsOn {
    pub fn new<I, S, F, R>(fields: I, derive: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldName>,
        F: Fn(&Inputs<'_>) -> R + Send + Sync + 'static,
        R: IntoDerived,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            derivation: Derivation::new(derive),
        }
    }

    /// Referenced field names, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldName] {
        &self.fields
    }

    #[must_use]
    pub const fn derivation(&self) -> &Derivation {
        &self.derivation
    }

    /// Runs the derivation against the values resolved so far.
    ///
    /// # Errors
    /// Propagates the derivation's own error unchanged.
    pub fn derive(&self, resolved: &FieldSet) -> Result<Option<Value>, DerivationError> {
        self.derivation.call(&Inputs::capture(&self.fields, resolved))
    }
}
