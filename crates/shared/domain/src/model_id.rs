use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Unique name of a registered model type.
///
/// Cheap to clone; the registry uses it as its lookup key and errors carry it
/// so a missing registration step can be located.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(Arc<str>);

impl ModelId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Derives an identifier from a Rust type's short name.
    ///
    /// Module paths are stripped, generic arguments are kept:
    /// `app::models::User` becomes `User`, `app::Page<app::User>` becomes `Page<app::User>`.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self::new(short_type_name(std::any::type_name::<T>()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn short_type_name(full: &str) -> &str {
    let head_end = full.find('<').unwrap_or(full.len());
    let head = &full[..head_end];
    let start = head.rfind("::").map_or(0, |idx| idx + 2);
    &full[start..]
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ModelId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModelId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ModelId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;
    #[allow(dead_code)]
    struct Wrapper<T>(T);

    #[test]
    fn derives_short_name_from_type() {
        assert_eq!(ModelId::of::<Plain>().as_str(), "Plain");
        assert_eq!(ModelId::of::<String>().as_str(), "String");
    }

    #[test]
    fn keeps_generic_arguments() {
        let id = ModelId::of::<Wrapper<Plain>>();
        assert!(id.as_str().starts_with("Wrapper<"));
        assert!(id.as_str().ends_with("Plain>"));
    }

    #[test]
    fn borrows_as_str_for_lookups() {
        let mut map = std::collections::HashMap::new();
        map.insert(ModelId::new("User"), 1);
        assert_eq!(map.get("User"), Some(&1));
    }
}
