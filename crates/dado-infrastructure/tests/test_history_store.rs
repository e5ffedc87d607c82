use dado_core::history::{HistoryEntry, HistoryLog, HistoryRepository, HistoryStore};
use dado_infrastructure::JsonHistoryRepository;
use tempfile::TempDir;

fn open(temp_dir: &TempDir) -> HistoryStore<JsonHistoryRepository> {
    let path = temp_dir.path().join("history.json");
    HistoryStore::load(JsonHistoryRepository::with_path(path))
}

#[test]
fn test_fresh_store_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(&temp_dir);
    assert!(store.log().is_empty());
    assert!(!temp_dir.path().join("history.json").exists());
}

#[test]
fn test_append_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    let mut store = open(&temp_dir);
    store
        .append(HistoryEntry::new("01/02/2024 18:00:00", "D20", 0, 13, vec![13]))
        .expect("Should append");
    store
        .append(HistoryEntry::new("01/02/2024 18:00:04", "D6", 2, 5, vec![5, 1]))
        .expect("Should append");

    let appended = HistoryEntry::new("01/02/2024 18:00:10", "D12", -2, 4, vec![4, 9]);
    store.append(appended.clone()).expect("Should append");
    drop(store);

    // Simulate a new process
    let reopened = open(&temp_dir);
    let log = reopened.log();
    assert_eq!(log.len(), 3);
    assert_eq!(log.entries()[0].die_label(), "D20");
    assert_eq!(log.entries()[1].die_label(), "D6");

    let last = log.last().unwrap();
    assert_eq!(last, &appended);
    assert_eq!(last.die_label(), "D12");
    assert_eq!(last.modifier(), -2);
    assert_eq!(last.final_value(), 4);
    assert_eq!(last.all_rolls(), &[4, 9]);
}

#[test]
fn test_corrupt_file_recovers_empty_and_is_kept_until_next_write() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history.json");
    std::fs::write(&path, "this is not json").unwrap();

    let mut store = open(&temp_dir);
    assert!(store.log().is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "this is not json");

    store
        .append(HistoryEntry::new("02/02/2024 08:30:00", "D8", 0, 8, vec![8]))
        .unwrap();

    let repo = JsonHistoryRepository::with_path(path);
    assert_eq!(repo.load().unwrap().len(), 1);
}

#[test]
fn test_wrong_shape_recovers_empty() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("history.json"), "{\"dice\": \"D6\"}").unwrap();

    assert!(open(&temp_dir).log().is_empty());
}

#[test]
fn test_clear_persists() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open(&temp_dir);
    store
        .append(HistoryEntry::new("03/02/2024 12:00:00", "D4", 1, 3, vec![3]))
        .unwrap();
    store.clear().unwrap();

    assert_eq!(open(&temp_dir).log(), &HistoryLog::new());
}

#[test]
fn test_history_file_with_lock_extension_survives_append() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rolls.lock");

    let mut store = HistoryStore::load(JsonHistoryRepository::with_path(path.clone()));
    let appended = HistoryEntry::new("05/02/2024 20:15:00", "D20", 3, 19, vec![7, 19, 2]);
    store.append(appended.clone()).expect("Should append");

    assert!(path.exists());
    let reopened = HistoryStore::load(JsonHistoryRepository::with_path(path));
    assert_eq!(reopened.log().len(), 1);
    assert_eq!(reopened.log().last(), Some(&appended));
}

#[cfg(unix)]
#[test]
fn test_write_failure_is_reported() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let locked_dir = temp_dir.path().join("locked");
    std::fs::create_dir(&locked_dir).unwrap();
    std::fs::set_permissions(&locked_dir, std::fs::Permissions::from_mode(0o500)).unwrap();

    let probe = locked_dir.join("probe");
    if std::fs::write(&probe, "").is_ok() {
        // Running with privileges that ignore permissions
        return;
    }

    let mut store = HistoryStore::load(JsonHistoryRepository::with_path(
        locked_dir.join("history.json"),
    ));
    let result = store.append(HistoryEntry::new("04/02/2024 07:00:00", "D10", 0, 2, vec![2]));

    std::fs::set_permissions(&locked_dir, std::fs::Permissions::from_mode(0o700)).unwrap();
    assert!(result.unwrap_err().is_io());
    assert!(store.log().is_empty());
}
