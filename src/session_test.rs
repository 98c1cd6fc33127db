use super::*;

fn sample_user() -> User {
    serde_json::from_value(serde_json::json!({
        "id": 7,
        "email": "a@b.com",
        "username": "anh",
        "full_name": "Anh Tran",
        "role": "admin",
        "is_active": true
    }))
    .unwrap()
}

#[test]
fn round_trip_token_and_profile() {
    let store = SessionStore::in_memory();
    let user = sample_user();
    store.store_auth("tok-123", Some(&user));

    let auth = store.stored_auth().unwrap();
    assert_eq!(auth.token, "tok-123");
    assert_eq!(auth.user, Some(user));
}

#[test]
fn token_without_profile() {
    let store = SessionStore::in_memory();
    store.store_auth("tok-123", None);

    let auth = store.stored_auth().unwrap();
    assert_eq!(auth.token, "tok-123");
    assert_eq!(auth.user, None);
}

#[test]
fn no_token_means_no_session() {
    let store = SessionStore::in_memory();
    assert!(store.stored_auth().is_none());
    assert!(store.token().is_none());
}

#[test]
fn profile_is_never_returned_without_a_token() {
    let backend = Arc::new(MemoryBackend::new());
    // A profile written without a token (e.g. a partial clear) must not
    // resurrect a session.
    backend.write(USER_KEY, &serde_json::to_string(&sample_user()).unwrap());

    let store = SessionStore::new(backend);
    assert!(store.stored_auth().is_none());
}

#[test]
fn repeated_store_overwrites_cleanly() {
    let store = SessionStore::in_memory();
    store.store_auth("first", Some(&sample_user()));
    store.store_auth("second", Some(&sample_user()));
    store.store_auth("third", None);

    let auth = store.stored_auth().unwrap();
    assert_eq!(auth.token, "third");
    // Last provided profile survives a token-only refresh.
    assert!(auth.user.is_some());
}

#[test]
fn malformed_cached_profile_is_tolerated() {
    let backend = Arc::new(MemoryBackend::new());
    backend.write(TOKEN_KEY, "tok-123");
    backend.write(USER_KEY, "{not json");

    let store = SessionStore::new(backend);
    let auth = store.stored_auth().unwrap();
    assert_eq!(auth.token, "tok-123");
    assert_eq!(auth.user, None);
}

#[test]
fn clear_removes_both_keys_and_is_safe_when_empty() {
    let store = SessionStore::in_memory();
    store.clear();
    assert!(store.stored_auth().is_none());

    store.store_auth("tok-123", Some(&sample_user()));
    store.clear();
    assert!(store.stored_auth().is_none());
    assert!(store.token().is_none());
}

#[test]
fn file_backend_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(Arc::new(FileBackend::new(dir.path().join("session"))));

    let user = sample_user();
    store.store_auth("tok-file", Some(&user));
    let auth = store.stored_auth().unwrap();
    assert_eq!(auth.token, "tok-file");
    assert_eq!(auth.user, Some(user));

    store.clear();
    assert!(store.stored_auth().is_none());
    // Clearing an already-empty directory must not log a hard failure.
    store.clear();
}

#[test]
fn file_backend_reads_none_for_missing_dir() {
    let backend = FileBackend::new("/nonexistent/ausvisa-test");
    assert_eq!(backend.read(TOKEN_KEY), None);
    backend.remove(TOKEN_KEY);
}
