//! Session flags for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Single source of truth for "is someone signed in, and as which role".
//! Mirrored to two storage keys so the session survives a page reload. The
//! shell reads it to pick navigation links; the logout route mutates it.
//!
//! DESIGN
//! ======
//! `SessionStore` is an explicitly constructed handle injected through Leptos
//! context, not a global. Clones share state. Consumers that need to react to
//! changes register a callback with [`SessionStore::subscribe`]; callbacks run
//! synchronously after each state change, with no lock held.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::config::StorageKeys;
use crate::util::storage::KeyValueStore;

/// Application roles as stored under the `role` key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Patient,
}

/// Error returned when parsing an unrecognised role string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    /// Stored string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::Patient => "patient",
        }
    }

    /// Route a freshly signed-in user of this role lands on.
    #[must_use]
    pub fn landing_path(self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::Doctor => "/doctor/dashboard",
            Self::Patient => "/patient/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "doctor" => Ok(Self::Doctor),
            "patient" => Ok(Self::Patient),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Authentication state. A role can only be present while logged in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    LoggedOut,
    /// `role` is `None` when a token is stored without a recognised role.
    LoggedIn { role: Option<Role> },
}

impl SessionState {
    #[must_use]
    pub fn is_logged_in(self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }

    #[must_use]
    pub fn role(self) -> Option<Role> {
        match self {
            Self::LoggedIn { role } => role,
            Self::LoggedOut => None,
        }
    }
}

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Arc<dyn Fn(SessionState) + Send + Sync>;

struct Inner {
    state: SessionState,
    next_subscription: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

/// Session flags backed by persistent key/value storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    inner: Arc<Mutex<Inner>>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("keys", &self.keys)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Read the stored flags and build the store. Call once at app start.
    pub fn initialize(storage: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        let state = read_state(storage.as_ref(), &keys);
        log::debug!("session initialized: {state:?}");
        Self {
            storage,
            keys,
            inner: Arc::new(Mutex::new(Inner {
                state,
                next_subscription: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.lock().state
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state().is_logged_in()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.state().role()
    }

    /// Persist `token` and `role`, then mark the session as logged in.
    ///
    /// Storage failures are logged and otherwise ignored; the in-memory state
    /// is updated regardless.
    pub fn login(&self, token: &str, role: Role) {
        self.write_key(&self.keys.token, token);
        self.write_key(&self.keys.role, role.as_str());
        log::info!("session login: role={role}");
        self.transition(SessionState::LoggedIn { role: Some(role) });
    }

    /// Clear both stored keys and mark the session as logged out.
    /// A second call is a no-op.
    pub fn logout(&self) {
        self.remove_key(&self.keys.token);
        self.remove_key(&self.keys.role);
        if self.transition(SessionState::LoggedOut) {
            log::info!("session logout");
        }
    }

    /// Register `callback` to run after every state change.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(SessionState) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.subscribers.push((id, Arc::new(callback)));
        id
    }

    /// Drop a subscription. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
        inner.subscribers.len() != before
    }

    /// Set `next` and notify subscribers. Returns whether the state changed.
    fn transition(&self, next: SessionState) -> bool {
        let subscribers: Vec<Subscriber> = {
            let mut inner = self.lock();
            if inner.state == next {
                return false;
            }
            inner.state = next;
            inner.subscribers.iter().map(|(_, sub)| Arc::clone(sub)).collect()
        };
        for sub in subscribers {
            sub(next);
        }
        true
    }

    fn write_key(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            log::warn!("session storage write failed: {e}");
        }
    }

    fn remove_key(&self, key: &str) {
        if let Err(e) = self.storage.remove(key) {
            log::warn!("session storage remove failed: {e}");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Read `key`, treating an empty string like a missing key.
fn read_key(storage: &dyn KeyValueStore, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            log::warn!("session storage read failed: {e}");
            None
        }
    }
}

/// Derive the session state from stored flags. A non-empty token alone means logged in.
///
/// An unrecognised stored role is removed so storage and state agree.
fn read_state(storage: &dyn KeyValueStore, keys: &StorageKeys) -> SessionState {
    if read_key(storage, &keys.token).is_none() {
        return SessionState::LoggedOut;
    }
    let role = read_key(storage, &keys.role).and_then(|raw| match raw.parse::<Role>() {
        Ok(role) => Some(role),
        Err(e) => {
            log::warn!("dropping stored role: {e}");
            if let Err(e) = storage.remove(&keys.role) {
                log::warn!("session storage remove failed: {e}");
            }
            None
        }
    });
    SessionState::LoggedIn { role }
}
