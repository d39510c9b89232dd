use fixtura_domain::{FieldSet, ModelId};
use fixtura_registry::{Blueprint, DependsOn, FactoryError, Inputs, Model, ModelRegistry, construct_with_serde};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, PartialEq, Deserialize)]
struct Account {
    id: String,
    email: String,
}

impl Model for Account {
    fn blueprint() -> Result<Blueprint, FactoryError> {
        Ok(Blueprint::new().field("id", "acc-1").derived(
            "email",
            "nobody@example.com",
            DependsOn::new(["id"], |inputs: &Inputs<'_>| format!("{}@example.com", inputs.text("id"))),
        ))
    }

    fn construct(fields: FieldSet) -> Result<Self, FactoryError> {
        construct_with_serde(fields)
    }
}

#[derive(Debug)]
struct Renamed;

impl Model for Renamed {
    fn model_id() -> ModelId {
        ModelId::new("legacy.Renamed")
    }

    fn blueprint() -> Result<Blueprint, FactoryError> {
        Ok(Blueprint::new())
    }

    fn construct(_fields: FieldSet) -> Result<Self, FactoryError> {
        Err("Renamed cannot be constructed".into())
    }
}

#[test]
fn register_model_uses_short_type_name() {
    let registry = ModelRegistry::new();
    registry.register_model::<Account>().unwrap();

    assert_eq!(Account::model_id().as_str(), "Account");
    let entry = registry.lookup("Account").unwrap();
    assert_eq!(entry.defaults().get("id"), Some(&json!("acc-1")));
    assert!(entry.options("email").is_some());
}

#[test]
fn custom_model_id_is_respected() {
    let registry = ModelRegistry::new();
    registry.register_model::<Renamed>().unwrap();
    assert!(registry.contains("legacy.Renamed"));
    assert!(!registry.contains("Renamed"));
}

#[test]
fn serde_construction_reports_mismatches() {
    let mut fields = FieldSet::new();
    fields.insert("id".to_owned(), json!(1));

    let err = Account::construct(fields).unwrap_err();
    assert!(matches!(err, FactoryError::Serde { .. }));
    assert_eq!(err.error_context(), Some("constructing 'Account'"));
}

#[test]
fn hand_written_construction_can_fail() {
    let err = Renamed::construct(FieldSet::new()).unwrap_err();
    assert!(matches!(err, FactoryError::Internal { .. }));
}
