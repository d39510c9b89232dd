//! Field sets and per-call overrides.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of a model field as it appears in a [`FieldSet`].
pub type FieldName = String;

/// Field name to value mapping. Iteration follows insertion order.
pub type FieldSet = Map<FieldName, Value>;

/// Returns `true` when a derived value should replace the static default.
///
/// `null`, `false`, zero and the empty string count as absent.
/// Arrays and objects are present even when empty.
#[must_use]
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Caller-supplied values for a single production call.
///
/// Overrides take precedence over both static defaults and derived values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overrides(FieldSet);

impl Overrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an override.
    #[must_use]
    pub fn set(mut self, field: impl Into<FieldName>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Adds an override from any serializable value.
    ///
    /// # Errors
    /// Returns the serializer error when `value` cannot be represented as JSON.
    pub fn try_set(
        mut self,
        field: impl Into<FieldName>,
        value: impl Serialize,
    ) -> Result<Self, serde_json::Error> {
        self.0.insert(field.into(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// Builds overrides from a JSON object. Returns `None` for any other JSON value.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &Value)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> FieldSet {
        self.0
    }
}

impl From<FieldSet> for Overrides {
    fn from(map: FieldSet) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for Overrides
where
    K: Into<FieldName>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a Overrides {
    type Item = (&'a FieldName, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values_are_absent() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_present(&value), "{value} should be absent");
        }
    }

    #[test]
    fn containers_are_present_even_when_empty() {
        for value in [json!([]), json!({}), json!(true), json!(-1), json!("x")] {
            assert!(is_present(&value), "{value} should be present");
        }
    }

    #[test]
    fn overrides_builder_keeps_insertion_order() {
        let overrides = Overrides::new().set("b", 1).set("a", "two").set("b", 3);
        let keys: Vec<_> = overrides.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(overrides.get("b"), Some(&json!(3)));
    }

    #[test]
    fn from_value_only_accepts_objects() {
        assert!(Overrides::from_value(json!([1, 2])).is_none());
        let overrides = Overrides::from_value(json!({ "name": "x" })).unwrap();
        assert!(overrides.contains("name"));
        assert_eq!(overrides.len(), 1);
    }

    #[test]
    fn try_set_serializes_structs() {
        #[derive(Serialize)]
        struct Address {
            city: &'static str,
        }

        let overrides = Overrides::new().try_set("address", Address { city: "Kyiv" }).unwrap();
        assert_eq!(overrides.get("address"), Some(&json!({ "city": "Kyiv" })));
    }
}
