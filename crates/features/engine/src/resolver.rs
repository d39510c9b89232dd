//! The resolution walk for a single production call.

use fixtura_domain::{FactoryConfig, FieldName, FieldSet, Overrides, Value, is_present};
use fixtura_registry::{FactoryError, FactoryErrorExt, ModelEntry};
use tracing::trace;

/// Computes the complete field set for one call.
///
/// `order` must be a processing order of `entry`'s fields. The result lists the
/// registered fields in declaration order, followed by any override keys the
/// model did not register.
///
/// # Errors
/// * [`FactoryError::UnknownField`] with `strict_overrides` and an unregistered override key.
/// * [`FactoryError::Derivation`] when a derivation function fails; the walk stops there.
pub fn resolve_fields(
    entry: &ModelEntry,
    order: &[FieldName],
    overrides: &Overrides,
    config: &FactoryConfig,
) -> Result<FieldSet, FactoryError> {
    if config.strict_overrides {
        if let Some((field, _)) = overrides.iter().find(|(field, _)| !entry.has_field(field)) {
            return Err(FactoryError::UnknownField {
                model: entry.id().clone(),
                field: field.clone(),
                context: None,
            });
        }
    }

    let mut resolved = FieldSet::with_capacity(order.len());
    for field in order {
        // A `null` override falls back to the default here; the final merge restores it.
        let initial = overrides
            .get(field)
            .filter(|value| !value.is_null())
            .or_else(|| entry.defaults().get(field))
            .cloned()
            .unwrap_or(Value::Null);
        resolved.insert(field.clone(), initial);

        let Some(depends_on) = entry.options(field).and_then(|o| o.depends_on.as_ref()) else {
            continue;
        };
        let derived = depends_on
            .derive(&resolved)
            .context(format!("field '{field}' of '{}'", entry.id()))?;

        match derived {
            Some(value) if is_present(&value) => {
                trace!(model = %entry.id(), field = %field, "Derived value applied");
                resolved.insert(field.clone(), value);
            }
            _ => trace!(model = %entry.id(), field = %field, "Derivation deferred to default"),
        }
    }

    let mut fields = FieldSet::with_capacity(resolved.len() + overrides.len());
    for name in entry.field_names() {
        if let Some(value) = resolved.remove(name) {
            fields.insert(name.clone(), value);
        }
    }
    for (field, value) in overrides {
        fields.insert(field.clone(), value.clone());
    }
    Ok(fields)
}
