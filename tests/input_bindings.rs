use std::io::Write;
use tempfile::NamedTempFile;
use vitrine::input::{Input, InputEvent, MoveAction};
use winit::keyboard::{Key, NamedKey};

#[test]
fn remapped_locomotion_overrides_defaults() {
    let mut temp = NamedTempFile::new().expect("temp input config");
    write!(temp, r#"{{"bindings":{{"forward":["k"],"up":["x","space"]}}}}"#)
        .expect("write remap config");

    let mut input = Input::from_config(temp.path());

    input.push(InputEvent::Key { key: Key::Character("k".into()), pressed: true });
    assert!(input.held(MoveAction::Forward), "custom key drives the forward action");
    input.push(InputEvent::Key { key: Key::Character("k".into()), pressed: false });
    assert!(!input.held(MoveAction::Forward));

    input.push(InputEvent::Key { key: Key::Character("w".into()), pressed: true });
    assert!(!input.held(MoveAction::Forward), "default key no longer fires when remapped");

    input.push(InputEvent::Key { key: Key::Character("q".into()), pressed: true });
    assert!(!input.held(MoveAction::Up), "old ascend key was replaced");
    input.push(InputEvent::Key { key: Key::Named(NamedKey::Space), pressed: true });
    assert!(input.held(MoveAction::Up), "space stayed bound through the override");
}

#[test]
fn default_bindings_cover_both_key_sets() {
    let mut input = Input::new();
    input.push(InputEvent::Key { key: Key::Named(NamedKey::ArrowUp), pressed: true });
    assert!(input.held(MoveAction::Forward));
    input.push(InputEvent::Key { key: Key::Named(NamedKey::ArrowUp), pressed: false });
    input.push(InputEvent::Key { key: Key::Character("W".into()), pressed: true });
    assert!(input.held(MoveAction::Forward), "bindings are case-insensitive");
    input.push(InputEvent::Key { key: Key::Named(NamedKey::Shift), pressed: true });
    assert!(input.held(MoveAction::Down));
}

#[test]
fn malformed_config_falls_back_to_defaults() {
    let mut temp = NamedTempFile::new().expect("temp input config");
    write!(temp, "not json").expect("write bad config");

    let mut input = Input::from_config(temp.path());
    input.push(InputEvent::Key { key: Key::Character("w".into()), pressed: true });
    assert!(input.held(MoveAction::Forward));
}
