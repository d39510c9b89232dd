use fixtura_domain::config::{DependencyOrdering, FactoryConfig};
use serde_json::json;

#[test]
fn config_defaults_are_compatible() {
    let config = FactoryConfig::default();
    assert_eq!(config.ordering, DependencyOrdering::DependencyCount);
    assert!(!config.strict_overrides);
}

#[test]
fn factory_config_deserializes() {
    let raw = json!({ "ordering": "topological", "strict_overrides": true });

    let cfg: FactoryConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.ordering, DependencyOrdering::Topological);
    assert!(cfg.strict_overrides);
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let cfg: FactoryConfig = serde_json::from_value(json!({})).expect("config deserialize");
    assert_eq!(cfg, FactoryConfig::default());
}
