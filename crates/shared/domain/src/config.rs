use serde::{Deserialize, Serialize};

/// How the engine orders fields before resolving them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyOrdering {
    /// Stable sort by the number of referenced fields, fewest first.
    ///
    /// A derivation only sees the resolved value of a field that sorts before it.
    #[default]
    DependencyCount,
    /// Referenced fields always resolve first; cycles are rejected.
    Topological,
}

/// Engine behaviour knobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    pub ordering: DependencyOrdering,
    /// Reject override keys that are not registered fields instead of passing them through.
    pub strict_overrides: bool,
}

impl FactoryConfig {
    #[must_use]
    pub const fn with_ordering(mut self, ordering: DependencyOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict_overrides = strict;
        self
    }
}
