use tally_core::{CountingScheme, ModelOption, ModelRegistry, RegistryError};

#[test]
fn builtin_registry_is_valid() {
    let registry = ModelRegistry::builtin();
    assert_eq!(registry.validate(), Ok(()));
    assert!(registry.options().len() > 1);
}

#[test]
fn builtin_default_uses_cl100k() {
    let registry = ModelRegistry::builtin();
    let default = registry.find(registry.default_key()).expect("default row");
    assert_eq!(default.value, "gpt-4");
    assert_eq!(default.scheme, CountingScheme::Bpe("cl100k_base"));
}

#[test]
fn builtin_has_exact_and_heuristic_rows() {
    let registry = ModelRegistry::builtin();
    assert!(registry.options().iter().any(|o| o.scheme.is_exact()));
    assert!(registry
        .options()
        .iter()
        .any(|o| o.scheme == CountingScheme::Heuristic));
}

#[test]
fn duplicate_values_are_rejected() {
    let result = ModelRegistry::new(vec![
        ModelOption::new("A", "same", "G", CountingScheme::Heuristic),
        ModelOption::new("B", "same", "G", CountingScheme::Bpe("cl100k_base")),
    ]);
    assert_eq!(result, Err(RegistryError::DuplicateValue("same".to_string())));
}

#[test]
fn empty_registry_is_rejected() {
    assert_eq!(ModelRegistry::new(Vec::new()), Err(RegistryError::Empty));
}

#[test]
fn lookup_and_groups_follow_declaration_order() {
    let registry = ModelRegistry::new(vec![
        ModelOption::new("One", "one", "First", CountingScheme::Heuristic),
        ModelOption::new("Two", "two", "Second", CountingScheme::Heuristic),
        ModelOption::new("Three", "three", "First", CountingScheme::Bpe("p50k_base")),
    ])
    .unwrap();

    assert_eq!(registry.position("three"), Some(2));
    assert_eq!(registry.find("two").map(|o| o.label), Some("Two"));
    assert!(registry.find("four").is_none());
    assert_eq!(registry.groups(), vec!["First", "Second"]);
    // No gpt-4 row, so the first row becomes the default.
    assert_eq!(registry.default_key(), "one");
}
