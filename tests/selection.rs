use vitrine::selection::SelectionRegistry;

#[test]
fn at_most_one_id_is_ever_selected() {
    let mut registry = SelectionRegistry::new();
    let ids = ["butterfly", "grasssea", "butterfly", "archloop", "archloop", "utsa"];
    for id in ids {
        registry.select(id);
        let selected: Vec<_> = ids.iter().filter(|candidate| registry.is_selected(candidate)).collect();
        assert!(selected.len() <= 1, "more than one selected after select({id})");
    }
}

#[test]
fn toggle_law() {
    let mut registry = SelectionRegistry::new();
    registry.select("a");
    registry.select("a");
    assert_eq!(registry.selected(), None);
}

#[test]
fn replacement_law() {
    let mut registry = SelectionRegistry::new();
    registry.select("a");
    registry.select("b");
    assert!(!registry.is_selected("a"));
    assert!(registry.is_selected("b"));
}

#[test]
fn deselect_clears_unconditionally() {
    let mut registry = SelectionRegistry::new();
    registry.deselect();
    assert_eq!(registry.selected(), None);
    registry.select("a");
    let change = registry.deselect();
    assert_eq!(change.previous.as_deref(), Some("a"));
    assert_eq!(registry.selected(), None);
}

#[test]
#[should_panic(expected = "outside an active session")]
fn query_after_close_fails_fast() {
    let mut registry = SelectionRegistry::new();
    registry.close();
    let _ = registry.is_selected("a");
}
