//! Tests for dock state persistence.

use super::store::parse_state;
use super::*;
use tempfile::TempDir;

fn calculator() -> DockSlotRecord {
    DockSlotRecord {
        name: "Calculator".into(),
        command: "Calculator.app".into(),
        autolaunch: true,
        ..Default::default()
    }
}

#[test]
fn missing_file_loads_empty_state() {
    let dir = TempDir::new().unwrap();
    let store = DockStateStore::new(dir.path().join("dock.toml"));
    let state = store.load();
    assert_eq!(state, PersistedDockState::default());
    assert_eq!(state.assigned().count(), 0);
}

#[test]
fn save_then_load_reproduces_assigned_slots() {
    let dir = TempDir::new().unwrap();
    let store = DockStateStore::new(dir.path().join("dock.toml"));

    let mut state = PersistedDockState::default();
    state.collapsed = true;
    state.slots.insert(3, calculator());
    state.slots.insert(
        10,
        DockSlotRecord {
            name: "Terminal".into(),
            command: "xterm -ls".into(),
            paste_command: "xterm -e %s".into(),
            dnd_command: "xterm -e less %d".into(),
            locked: true,
            image_path: "/usr/share/icons/xterm.tiff".into(),
            ..Default::default()
        },
    );

    store.save(&state).unwrap();
    let loaded = store.load();

    assert_eq!(loaded, state);
    assert!(loaded.slot(0).is_none());
    assert!(loaded.slot(1).is_none());
    assert_eq!(loaded.slot(10).unwrap().paste_command, "xterm -e %s");
}

#[test]
fn unassigned_slots_are_not_persisted() {
    let dir = TempDir::new().unwrap();
    let store = DockStateStore::new(dir.path().join("dock.toml"));

    let mut state = PersistedDockState::default();
    state.slots.insert(
        2,
        DockSlotRecord {
            locked: true,
            ..Default::default()
        },
    );
    store.save(&state).unwrap();

    let loaded = store.load();
    assert!(loaded.slots.is_empty());
}

#[test]
fn slot_missing_autolaunch_defaults_to_false() {
    let state = parse_state(
        r#"
version = 1

[slots.5]
command = "TextEdit.app"
locked = true
"#,
    );
    let slot = state.slot(5).unwrap();
    assert_eq!(slot.command, "TextEdit.app");
    assert!(!slot.autolaunch);
    assert!(slot.locked);
    assert!(slot.paste_command.is_empty());
}

#[test]
fn malformed_slot_is_left_unassigned_others_survive() {
    let state = parse_state(
        r#"
[slots.1]
command = "Good.app"

[slots.2]
command = "Bad.app"
autolaunch = "sometimes"

[slots.nope]
command = "NotAPosition.app"
"#,
    );
    assert_eq!(state.slot(1).unwrap().command, "Good.app");
    assert!(state.slot(2).is_none());
    assert_eq!(state.assigned().count(), 1);
}

#[test]
fn garbage_file_loads_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dock.toml");
    std::fs::write(&path, "[[[ not toml").unwrap();

    let state = DockStateStore::new(&path).load();
    assert_eq!(state, PersistedDockState::default());
}

#[test]
fn autolaunch_positions_are_ascending() {
    let mut state = PersistedDockState::default();
    state.slots.insert(9, calculator());
    state.slots.insert(3, calculator());
    state.slots.insert(
        5,
        DockSlotRecord {
            command: "Mail.app".into(),
            ..Default::default()
        },
    );
    assert_eq!(state.autolaunch_positions(), vec![3, 9]);
}

#[test]
fn save_creates_parent_dirs_and_cleans_tmp() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("dock.toml");
    let store = DockStateStore::new(&path);

    let mut state = PersistedDockState::default();
    state.slots.insert(0, calculator());
    store.save(&state).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("toml.tmp").exists());
}

#[test]
fn failed_save_leaves_previous_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dock.toml");
    let store = DockStateStore::new(&path);

    let mut state = PersistedDockState::default();
    state.slots.insert(0, calculator());
    store.save(&state).unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    // A directory squatting on the temp path makes the write fail.
    std::fs::create_dir(path.with_extension("toml.tmp")).unwrap();
    state.slots.insert(1, DockSlotRecord::new("Other.app"));
    assert!(store.save(&state).is_err());

    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    assert_eq!(store.load().assigned().count(), 1);
}

#[test]
fn file_uses_camel_case_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dock.toml");
    let mut state = PersistedDockState::default();
    state.slots.insert(
        4,
        DockSlotRecord {
            command: "a".into(),
            paste_command: "b".into(),
            dnd_command: "c".into(),
            image_path: "d".into(),
            ..Default::default()
        },
    );
    DockStateStore::new(&path).save(&state).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("pasteCommand"));
    assert!(text.contains("dndCommand"));
    assert!(text.contains("imagePath"));
    assert!(text.contains("[slots.4]"));
}
