//! Durability scenarios: window geometry, wallpaper, and notepad state
//! surviving a full process restart (modeled as a store reload).

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use term_desk::geometry::{Position, Size};
use term_desk::persist::ConfigStore;
use term_desk::window::{ContentKind, Visibility, WindowManager};

fn store_at(path: PathBuf) -> Rc<RefCell<ConfigStore>> {
    Rc::new(RefCell::new(ConfigStore::load_or_default(path)))
}

#[test]
fn window_geometry_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state.json");

    {
        let store = store_at(path.clone());
        let mut wm = WindowManager::new(Size::new(1920, 1080), store);
        let id = wm.open(ContentKind::Resume);
        wm.update_window_position(id, Position::new(250, 300));
        wm.update_window_size(id, Size::new(640, 480));
    }

    let store = store_at(path);
    let mut wm = WindowManager::new(Size::new(1920, 1080), store);
    let id = wm.open(ContentKind::Resume);
    let record = wm.window(id).unwrap();
    assert_eq!(record.position, Position::new(250, 300));
    assert_eq!(record.size, Size::new(640, 480));
}

#[test]
fn maximized_state_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state.json");

    {
        let store = store_at(path.clone());
        let mut wm = WindowManager::new(Size::new(1920, 1080), store);
        let id = wm.open(ContentKind::Projects);
        wm.toggle_maximize(id);
    }

    let store = store_at(path);
    let mut wm = WindowManager::new(Size::new(1920, 1080), store);
    let id = wm.open(ContentKind::Projects);
    let record = wm.window(id).unwrap();
    assert_eq!(record.visibility, Visibility::Maximized);
    // The remembered normal-state geometry is intact underneath.
    assert_eq!(record.size, Size::new(800, 600));
}

#[test]
fn persisted_geometry_is_clamped_to_a_smaller_viewport() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state.json");

    {
        let store = store_at(path.clone());
        let mut wm = WindowManager::new(Size::new(1920, 1080), store);
        let id = wm.open(ContentKind::About);
        wm.update_window_position(id, Position::new(400, 1100));
    }

    // Reopen on a much smaller desktop.
    let store = store_at(path);
    let mut wm = WindowManager::new(Size::new(1000, 780), store);
    let id = wm.open(ContentKind::About);
    let record = wm.window(id).unwrap();
    assert_eq!(record.position, Position::new(180, 200));
}

#[test]
fn notepad_counter_continues_across_restarts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state.json");

    {
        let store = store_at(path.clone());
        let mut wm = WindowManager::new(Size::new(1920, 1080), Rc::clone(&store));
        wm.open(ContentKind::Notepad);
        wm.open(ContentKind::Notepad);
    }

    let store = store_at(path);
    assert_eq!(store.borrow_mut().next_notepad_name(), "Untitled 3");
}

#[test]
fn wallpaper_choice_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state.json");

    {
        let store = store_at(path.clone());
        store.borrow_mut().set_wallpaper("matrix");
    }

    let store = store_at(path);
    assert_eq!(store.borrow().wallpaper(), "matrix");
}

#[test]
fn corrupt_state_file_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state.json");
    fs::write(&path, "{\"schema_version\": 1, \"window_configs\":").expect("write");

    let store = store_at(path);
    let mut wm = WindowManager::new(Size::new(1920, 1080), store);
    let id = wm.open(ContentKind::Resume);
    // Fresh defaults: cascade origin, default size.
    let record = wm.window(id).unwrap();
    assert_eq!(record.position, Position::new(100, 100));
    assert_eq!(record.size, Size::new(800, 600));
}
