//! Field processing order.

use fixtura_domain::{DependencyOrdering, FieldName};
use fixtura_registry::{FactoryError, FieldOptions, ModelEntry};
use fxhash::FxHashMap;

/// Order in which `entry`'s fields are resolved.
///
/// # Errors
/// [`FactoryError::CyclicDerivation`] in [`DependencyOrdering::Topological`] mode
/// when derivations reference each other in a loop.
pub fn processing_order(
    entry: &ModelEntry,
    ordering: DependencyOrdering,
) -> Result<Vec<FieldName>, FactoryError> {
    match ordering {
        DependencyOrdering::DependencyCount => Ok(by_dependency_count(entry)),
        DependencyOrdering::Topological => topological(entry),
    }
}

/// Stable sort on the number of referenced fields.
///
/// Only an approximation of dependency order: a field referencing another field
/// with the same or a higher count may run before it.
fn by_dependency_count(entry: &ModelEntry) -> Vec<FieldName> {
    let mut names: Vec<FieldName> = entry.field_names().cloned().collect();
    names.sort_by_key(|name| entry.options(name).map_or(0, FieldOptions::reference_count));
    names
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Depth-first post-order over declared fields; declaration order breaks ties.
fn topological(entry: &ModelEntry) -> Result<Vec<FieldName>, FactoryError> {
    let mut marks = FxHashMap::default();
    let mut order = Vec::with_capacity(entry.defaults().len());
    for name in entry.field_names() {
        visit(entry, name, &mut marks, &mut order)?;
    }
    Ok(order)
}

fn visit<'e>(
    entry: &'e ModelEntry,
    name: &'e str,
    marks: &mut FxHashMap<&'e str, Mark>,
    order: &mut Vec<FieldName>,
) -> Result<(), FactoryError> {
    match marks.get(name) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => {
            return Err(FactoryError::CyclicDerivation {
                model: entry.id().clone(),
                field: name.to_owned(),
                context: None,
            });
        }
        None => {}
    }

    marks.insert(name, Mark::Visiting);
    if let Some(depends_on) = entry.options(name).and_then(|o| o.depends_on.as_ref()) {
        // References to unregistered fields cannot be ordered; they resolve to nothing.
        for reference in depends_on.fields().iter().filter(|r| entry.has_field(r)) {
            visit(entry, reference, marks, order)?;
        }
    }
    marks.insert(name, Mark::Done);
    order.push(name.to_owned());
    Ok(())
}
