use super::*;
use crate::util::storage::MemoryStorage;
use std::sync::atomic::{AtomicUsize, Ordering};

fn store_with(storage: &Arc<MemoryStorage>) -> SessionStore {
    SessionStore::initialize(storage.clone(), StorageKeys::default())
}

// =============================================================
// Role
// =============================================================

#[test]
fn role_round_trips_through_str() {
    for role in [Role::Admin, Role::Doctor, Role::Patient] {
        assert_eq!(role.as_str().parse::<Role>(), Ok(role));
    }
}

#[test]
fn role_parse_rejects_unknown() {
    assert_eq!("nurse".parse::<Role>(), Err(UnknownRole("nurse".to_owned())));
    assert_eq!("Admin".parse::<Role>(), Err(UnknownRole("Admin".to_owned())));
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Doctor).unwrap(), "\"doctor\"");
}

#[test]
fn role_landing_paths() {
    assert_eq!(Role::Admin.landing_path(), "/admin/dashboard");
    assert_eq!(Role::Doctor.landing_path(), "/doctor/dashboard");
    assert_eq!(Role::Patient.landing_path(), "/patient/dashboard");
}

// =============================================================
// SessionState
// =============================================================

#[test]
fn session_state_default_is_logged_out() {
    let state = SessionState::default();
    assert!(!state.is_logged_in());
    assert_eq!(state.role(), None);
}

#[test]
fn session_state_wire_form_is_tagged() {
    let state = SessionState::LoggedIn { role: Some(Role::Patient) };
    assert_eq!(
        serde_json::to_value(state).unwrap(),
        serde_json::json!({ "status": "logged_in", "role": "patient" })
    );
}

// =============================================================
// initialize
// =============================================================

#[test]
fn initialize_empty_storage_is_logged_out() {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_with(&storage);
    assert!(!store.is_logged_in());
    assert_eq!(store.role(), None);
}

#[test]
fn initialize_reads_persisted_flags_like_a_reload() {
    let storage = Arc::new(MemoryStorage::with_entries([("token", "tok123"), ("role", "patient")]));
    let store = store_with(&storage);
    assert!(store.is_logged_in());
    assert_eq!(store.role(), Some(Role::Patient));
}

#[test]
fn initialize_token_without_role_is_logged_in_without_role() {
    let storage = Arc::new(MemoryStorage::with_entries([("token", "tok123")]));
    let store = store_with(&storage);
    assert_eq!(store.state(), SessionState::LoggedIn { role: None });
}

#[test]
fn initialize_unknown_role_is_dropped() {
    let storage =
        Arc::new(MemoryStorage::with_entries([("token", "tok123"), ("role", "janitor")]));
    let store = store_with(&storage);
    assert_eq!(store.state(), SessionState::LoggedIn { role: None });
}

#[test]
fn initialize_removes_unknown_stored_role() {
    let storage = Arc::new(MemoryStorage::with_entries([("token", "tok123"), ("role", "nurse")]));
    store_with(&storage);
    assert_eq!(storage.get("role").unwrap(), None);
    assert_eq!(storage.get("token").unwrap(), Some("tok123".to_owned()));

    let reloaded = store_with(&storage);
    assert_eq!(reloaded.state(), SessionState::LoggedIn { role: None });
}

#[test]
fn initialize_role_without_token_is_logged_out() {
    let storage = Arc::new(MemoryStorage::with_entries([("role", "admin")]));
    let store = store_with(&storage);
    assert_eq!(store.state(), SessionState::LoggedOut);
}

#[test]
fn initialize_empty_token_is_logged_out() {
    let storage = Arc::new(MemoryStorage::with_entries([("token", ""), ("role", "admin")]));
    let store = store_with(&storage);
    assert!(!store.is_logged_in());
}

#[test]
fn initialize_honours_custom_key_names() {
    let storage = Arc::new(MemoryStorage::with_entries([
        ("clinic.token", "t"),
        ("clinic.role", "doctor"),
    ]));
    let keys = StorageKeys {
        token: "clinic.token".to_owned(),
        role: "clinic.role".to_owned(),
    };
    let store = SessionStore::initialize(storage, keys);
    assert_eq!(store.role(), Some(Role::Doctor));
}

// =============================================================
// login / logout
// =============================================================

#[test]
fn login_sets_flags_and_persists_both_keys() {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_with(&storage);
    store.login("tok123", Role::Doctor);

    assert!(store.is_logged_in());
    assert_eq!(store.role(), Some(Role::Doctor));
    assert_eq!(storage.get("token").unwrap(), Some("tok123".to_owned()));
    assert_eq!(storage.get("role").unwrap(), Some("doctor".to_owned()));
}

#[test]
fn logout_after_login_clears_flags_and_storage() {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_with(&storage);
    store.login("tok123", Role::Doctor);
    store.logout();

    assert!(!store.is_logged_in());
    assert_eq!(store.role(), None);
    assert_eq!(storage.get("token").unwrap(), None);
    assert_eq!(storage.get("role").unwrap(), None);
    assert!(storage.is_empty());
}

#[test]
fn logout_when_logged_out_is_noop() {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_with(&storage);
    store.logout();
    store.logout();
    assert_eq!(store.state(), SessionState::LoggedOut);
    assert!(storage.is_empty());
}

#[test]
fn login_survives_reinitialize() {
    let storage = Arc::new(MemoryStorage::new());
    store_with(&storage).login("tok123", Role::Admin);

    let reloaded = store_with(&storage);
    assert_eq!(reloaded.state(), SessionState::LoggedIn { role: Some(Role::Admin) });
}

#[test]
fn clones_share_state() {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_with(&storage);
    let other = store.clone();
    store.login("t", Role::Patient);
    assert_eq!(other.role(), Some(Role::Patient));
}

#[cfg(not(feature = "csr"))]
#[test]
fn login_without_storage_still_updates_memory() {
    let storage = Arc::new(crate::util::storage::BrowserStorage);
    let store = SessionStore::initialize(storage, StorageKeys::default());
    store.login("t", Role::Admin);
    assert_eq!(store.role(), Some(Role::Admin));
    store.logout();
    assert!(!store.is_logged_in());
}

// =============================================================
// subscriptions
// =============================================================

#[test]
fn subscribers_see_each_change_synchronously() {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_with(&storage);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    store.subscribe(move |state| sink.lock().unwrap().push(state));

    store.login("t", Role::Doctor);
    store.logout();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![SessionState::LoggedIn { role: Some(Role::Doctor) }, SessionState::LoggedOut]
    );
}

#[test]
fn repeated_logout_notifies_once() {
    let storage = Arc::new(MemoryStorage::with_entries([("token", "t")]));
    let store = store_with(&storage);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    store.logout();
    store.logout();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unsubscribe_stops_notifications() {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_with(&storage);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let id = store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.login("t", Role::Admin);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn subscriber_can_read_store_without_deadlock() {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_with(&storage);
    let observed = Arc::new(Mutex::new(None));
    let sink = observed.clone();
    let handle = store.clone();
    store.subscribe(move |_| {
        *sink.lock().unwrap() = Some(handle.is_logged_in());
    });

    store.login("t", Role::Patient);
    assert_eq!(*observed.lock().unwrap(), Some(true));
}
