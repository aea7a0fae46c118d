// Order set tests - per-agent persisted code sets
use artifacts_crew::OrderSet;
use tempfile::TempDir;

fn set_path(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_string_lossy().to_string()
}

#[test]
fn test_add_reports_new_versus_known() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut set = OrderSet::open_fresh(&set_path(&dir, "banned.json"));

    assert!(set.add("copper_ore"), "First add should report a new code");
    assert!(!set.add("copper_ore"), "Second add should report it was already there");
    assert_eq!(set.len(), 1, "Duplicate adds should not grow the set");

    println!("✅ Add idempotence test passed");
}

#[test]
fn test_contains_and_remove() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut set = OrderSet::open_fresh(&set_path(&dir, "current.json"));

    set.add("ash_wood");
    assert!(set.contains("ash_wood"));
    assert!(!set.contains("copper_ore"));

    assert!(set.remove("ash_wood"), "Removing a held code should report true");
    assert!(!set.remove("ash_wood"), "Removing it again should report false");
    assert!(set.is_empty());

    println!("✅ Contains/remove test passed");
}

#[test]
fn test_clear_empties_the_set() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut set = OrderSet::open_fresh(&set_path(&dir, "current.json"));

    set.add("copper_ore");
    set.add("ash_wood");
    set.clear();

    assert!(set.is_empty(), "Clear should drop every code");
    assert!(!set.contains("copper_ore"));

    println!("✅ Clear test passed");
}

#[test]
fn test_codes_survive_reloading() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = set_path(&dir, "current.json");

    let mut set = OrderSet::open_fresh(&path);
    set.add("copper_ore");
    set.add("raw_hide");
    drop(set);

    let reloaded = OrderSet::load(&path);
    assert_eq!(reloaded.len(), 2, "Codes should come back from disk");
    assert!(reloaded.contains("copper_ore"));
    assert!(reloaded.contains("raw_hide"));

    println!("✅ Reload test passed");
}

#[test]
fn test_open_fresh_truncates_the_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = set_path(&dir, "banned.json");

    let mut stale = OrderSet::open_fresh(&path);
    stale.add("copper_ore");
    stale.add("iron_sword");
    drop(stale);

    // A new session starts with no bans carried over
    let fresh = OrderSet::open_fresh(&path);
    assert!(fresh.is_empty(), "Fresh open should start empty");
    drop(fresh);

    let reloaded = OrderSet::load(&path);
    assert!(reloaded.is_empty(), "Truncation should reach the file too");

    println!("✅ Fresh open test passed");
}

#[test]
fn test_missing_file_loads_empty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let set = OrderSet::load(&set_path(&dir, "never_written.json"));

    assert!(set.is_empty(), "Missing file should mean an empty set");

    println!("✅ Missing file test passed");
}
