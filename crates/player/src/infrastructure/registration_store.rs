//! In-memory registration store with live subscriptions.
//!
//! Stands in for the hosted document store in the preview runner and in
//! tests. Watchers are push-based: every change to a registration document
//! is delivered to the listeners watching that document, and a new watcher
//! immediately receives the current state.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use eventdeck_domain::{EventId, UserId};

use crate::ports::outbound::{
    registration_path, RegistrationSnapshot, RegistrationStorePort, SnapshotListener,
    StoreError, SubscriptionHandle,
};

type DocumentKey = (EventId, UserId);

struct Watch {
    key: DocumentKey,
    listener: SnapshotListener,
}

#[derive(Default)]
struct StoreState {
    registrations: HashSet<DocumentKey>,
    denied_users: HashSet<UserId>,
    watches: HashMap<u64, Watch>,
    next_watch_id: u64,
}

impl StoreState {
    fn notify(&mut self, key: &DocumentKey, result: Result<RegistrationSnapshot, StoreError>) {
        for watch in self.watches.values_mut().filter(|w| &w.key == key) {
            (watch.listener)(result.clone());
        }
    }
}

/// Registration documents held in memory
#[derive(Clone, Default)]
pub struct InMemoryRegistrationStore {
    state: Arc<Mutex<StoreState>>,
}

fn lock(state: &Mutex<StoreState>) -> MutexGuard<'_, StoreState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the registration document and notifies its watchers.
    pub fn register(&self, event_id: &EventId, user_id: &UserId) {
        let key = (event_id.clone(), user_id.clone());
        let mut state = lock(&self.state);
        if state.registrations.insert(key.clone()) {
            tracing::debug!(path = %registration_path(event_id, user_id), "registration created");
        }
        state.notify(&key, Ok(RegistrationSnapshot::exists()));
    }

    /// Deletes the registration document and notifies its watchers.
    pub fn unregister(&self, event_id: &EventId, user_id: &UserId) {
        let key = (event_id.clone(), user_id.clone());
        let mut state = lock(&self.state);
        if state.registrations.remove(&key) {
            tracing::debug!(path = %registration_path(event_id, user_id), "registration deleted");
        }
        state.notify(&key, Ok(RegistrationSnapshot::missing()));
    }

    pub fn is_registered(&self, event_id: &EventId, user_id: &UserId) -> bool {
        lock(&self.state)
            .registrations
            .contains(&(event_id.clone(), user_id.clone()))
    }

    /// Revokes read access for a user; new watches by that user fail with
    /// `PermissionDenied`.
    pub fn deny_user(&self, user_id: &UserId) {
        lock(&self.state).denied_users.insert(user_id.clone());
    }

    /// Pushes an error to every watcher of one document.
    pub fn fail_watches(&self, event_id: &EventId, user_id: &UserId, error: StoreError) {
        let key = (event_id.clone(), user_id.clone());
        lock(&self.state).notify(&key, Err(error));
    }

    /// Number of live subscriptions.
    pub fn watch_count(&self) -> usize {
        lock(&self.state).watches.len()
    }
}

impl RegistrationStorePort for InMemoryRegistrationStore {
    fn watch_registration(
        &self,
        event_id: &EventId,
        user_id: &UserId,
        mut listener: SnapshotListener,
    ) -> SubscriptionHandle {
        let key = (event_id.clone(), user_id.clone());
        let path = registration_path(event_id, user_id);
        let mut state = lock(&self.state);

        if state.denied_users.contains(user_id) {
            tracing::debug!(%path, "watch rejected: permission denied");
            listener(Err(StoreError::PermissionDenied(path)));
            return SubscriptionHandle::detached();
        }

        let exists = state.registrations.contains(&key);
        listener(Ok(RegistrationSnapshot { exists }));

        let watch_id = state.next_watch_id;
        state.next_watch_id += 1;
        state.watches.insert(watch_id, Watch { key, listener });
        tracing::debug!(%path, watch_id, "watch opened");

        let weak: Weak<Mutex<StoreState>> = Arc::downgrade(&self.state);
        SubscriptionHandle::new(move || {
            if let Some(state) = weak.upgrade() {
                lock(&state).watches.remove(&watch_id);
                tracing::debug!(watch_id, "watch released");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (EventId, UserId) {
        (EventId::new("evt-1").unwrap(), UserId::new("uid-1").unwrap())
    }

    fn recording_listener() -> (SnapshotListener, Arc<Mutex<Vec<Result<bool, StoreError>>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let listener: SnapshotListener = Box::new(move |result| {
            seen_clone
                .lock()
                .unwrap()
                .push(result.map(|snapshot| snapshot.exists));
        });
        (listener, seen)
    }

    #[test]
    fn test_new_watch_receives_current_state() {
        let store = InMemoryRegistrationStore::new();
        let (event_id, user_id) = ids();
        store.register(&event_id, &user_id);

        let (listener, seen) = recording_listener();
        let _handle = store.watch_registration(&event_id, &user_id, listener);

        assert_eq!(*seen.lock().unwrap(), vec![Ok(true)]);
    }

    #[test]
    fn test_changes_are_pushed_to_watchers() {
        let store = InMemoryRegistrationStore::new();
        let (event_id, user_id) = ids();

        let (listener, seen) = recording_listener();
        let _handle = store.watch_registration(&event_id, &user_id, listener);
        store.register(&event_id, &user_id);
        store.unregister(&event_id, &user_id);

        assert_eq!(*seen.lock().unwrap(), vec![Ok(false), Ok(true), Ok(false)]);
        assert!(!store.is_registered(&event_id, &user_id));
    }

    #[test]
    fn test_other_documents_do_not_notify() {
        let store = InMemoryRegistrationStore::new();
        let (event_id, user_id) = ids();
        let other_event = EventId::new("evt-2").unwrap();

        let (listener, seen) = recording_listener();
        let _handle = store.watch_registration(&event_id, &user_id, listener);
        store.register(&other_event, &user_id);

        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_dropping_handle_releases_watch() {
        let store = InMemoryRegistrationStore::new();
        let (event_id, user_id) = ids();

        let (listener, seen) = recording_listener();
        let handle = store.watch_registration(&event_id, &user_id, listener);
        assert_eq!(store.watch_count(), 1);

        drop(handle);
        assert_eq!(store.watch_count(), 0);

        store.register(&event_id, &user_id);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_denied_user_gets_permission_error() {
        let store = InMemoryRegistrationStore::new();
        let (event_id, user_id) = ids();
        store.deny_user(&user_id);

        let (listener, seen) = recording_listener();
        let handle = store.watch_registration(&event_id, &user_id, listener);

        assert!(!handle.is_active());
        assert_eq!(store.watch_count(), 0);
        assert!(matches!(
            seen.lock().unwrap().as_slice(),
            [Err(StoreError::PermissionDenied(_))]
        ));
    }

    #[test]
    fn test_fail_watches_pushes_error() {
        let store = InMemoryRegistrationStore::new();
        let (event_id, user_id) = ids();

        let (listener, seen) = recording_listener();
        let _handle = store.watch_registration(&event_id, &user_id, listener);
        store.fail_watches(&event_id, &user_id, StoreError::Unavailable("offline".into()));

        assert_eq!(
            seen.lock().unwrap().last(),
            Some(&Err(StoreError::Unavailable("offline".into())))
        );
    }
}
