use super::*;

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap(), None);

    storage.set(AUTH_TOKEN_KEY, "abc123").unwrap();
    assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("abc123"));

    storage.remove(AUTH_TOKEN_KEY).unwrap();
    assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap(), None);
}

#[test]
fn memory_storage_remove_absent_key_is_ok() {
    let storage = MemoryStorage::new();
    assert!(storage.remove("missing").is_ok());
}

#[test]
fn memory_storage_with_token_seeds_auth_key() {
    let storage = MemoryStorage::with_token("seeded");
    assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("seeded"));
}

#[test]
fn file_storage_missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("storage.json"));
    assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap(), None);
    assert!(storage.remove(AUTH_TOKEN_KEY).is_ok());
    assert!(!storage.path().exists());
}

#[test]
fn file_storage_survives_new_instance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    FileStorage::new(&path).set(AUTH_TOKEN_KEY, "abc123").unwrap();
    FileStorage::new(&path).set(REMEMBER_ME_KEY, "true").unwrap();

    let reopened = FileStorage::new(&path);
    assert_eq!(reopened.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("abc123"));
    assert_eq!(reopened.get(REMEMBER_ME_KEY).unwrap().as_deref(), Some("true"));
}

#[test]
fn file_storage_remove_keeps_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("storage.json"));
    storage.set(AUTH_TOKEN_KEY, "abc123").unwrap();
    storage.set(REMEMBER_ME_KEY, "true").unwrap();

    storage.remove(AUTH_TOKEN_KEY).unwrap();

    assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get(REMEMBER_ME_KEY).unwrap().as_deref(), Some("true"));
}

#[test]
fn file_storage_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json").unwrap();

    let err = FileStorage::new(&path).get(AUTH_TOKEN_KEY).unwrap_err();
    assert!(matches!(err, StorageError::Corrupt { .. }));
}

#[test]
fn file_storage_write_replaces_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json").unwrap();
    let storage = FileStorage::new(&path);

    storage.set(AUTH_TOKEN_KEY, "abc123").unwrap();

    assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("abc123"));
}

#[test]
fn file_storage_remove_resets_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{ truncated").unwrap();
    let storage = FileStorage::new(&path);

    storage.remove(AUTH_TOKEN_KEY).unwrap();

    assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get(REMEMBER_ME_KEY).unwrap(), None);
}
