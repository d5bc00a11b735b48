use super::*;
use tempfile::TempDir;

fn manager() -> (TempDir, ProfileManager) {
    let dir = TempDir::new().unwrap();
    let manager = ProfileManager::with_root(dir.path().join("profiles")).unwrap();
    (dir, manager)
}

#[test]
fn test_create_list_delete() {
    let (_dir, manager) = manager();

    let path = manager.create_profile("work", "chrome").unwrap();
    assert!(path.join("metadata.json").exists());

    let profiles = manager.list_profiles().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].name, "work");
    assert_eq!(profiles[0].browser, "chrome");

    manager.delete_profile("work").unwrap();
    assert!(manager.list_profiles().unwrap().is_empty());
}

#[test]
fn test_duplicate_and_missing_profiles() {
    let (_dir, manager) = manager();

    manager.create_profile("work", "chrome").unwrap();
    assert!(manager.create_profile("work", "chrome").is_err());
    assert!(manager.delete_profile("missing").is_err());
    assert!(manager.get_profile_path("missing").is_err());
}

#[test]
fn test_get_or_create_reuses_directory() {
    let (_dir, manager) = manager();

    let first = manager.get_or_create_profile_path("main", "chrome").unwrap();
    let second = manager.get_or_create_profile_path("main", "chrome").unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.list_profiles().unwrap().len(), 1);
}

#[test]
fn test_get_profile_path_touches_last_used() {
    let (_dir, manager) = manager();

    manager.create_profile("a", "chrome").unwrap();
    manager.create_profile("b", "chrome").unwrap();
    std::thread::sleep(std::time::Duration::from_millis(10));
    manager.get_profile_path("a").unwrap();

    let profiles = manager.list_profiles().unwrap();
    assert_eq!(profiles[0].name, "a");
}

#[test]
fn test_rejects_path_like_names() {
    let (_dir, manager) = manager();

    assert!(manager.create_profile("../escape", "chrome").is_err());
    assert!(manager.create_profile("", "chrome").is_err());
    assert!(manager.create_profile("..", "chrome").is_err());
}
