//! Registration status for one event card
//!
//! Watches the current user's registration document for an event and
//! reflects its existence as a boolean. Store errors are expected for users
//! without read access, so every error maps to "not registered" and is never
//! surfaced or retried.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use eventdeck_domain::{EventId, UserId};
use tokio::sync::watch;

use crate::ports::outbound::{RegistrationStorePort, SnapshotResult, SubscriptionHandle};

pub struct RegistrationWatcher {
    store: Arc<dyn RegistrationStorePort>,
    event_id: EventId,
    user_id: Option<UserId>,
    status: Arc<watch::Sender<bool>>,
    /// Bumped on every resubscribe; listeners from older subscriptions
    /// compare against it and drop late notifications.
    generation: Arc<AtomicU64>,
    subscription: Option<SubscriptionHandle>,
}

impl RegistrationWatcher {
    /// Starts watching when a user is present; without one the status is
    /// `false` and no subscription is opened.
    pub fn new(
        store: Arc<dyn RegistrationStorePort>,
        event_id: EventId,
        user_id: Option<UserId>,
    ) -> Self {
        let (status, _) = watch::channel(false);
        let mut watcher = Self {
            store,
            event_id,
            user_id,
            status: Arc::new(status),
            generation: Arc::new(AtomicU64::new(0)),
            subscription: None,
        };
        watcher.resubscribe();
        watcher
    }

    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn is_registered(&self) -> bool {
        *self.status.borrow()
    }

    /// Live status stream. The receiver sees the current value immediately
    /// and is only notified when the value changes.
    pub fn status(&self) -> watch::Receiver<bool> {
        self.status.subscribe()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(SubscriptionHandle::is_active)
    }

    /// Switches the watched user. Releases the previous subscription first;
    /// `None` resets the status to `false`.
    pub fn set_user(&mut self, user_id: Option<UserId>) {
        if self.user_id == user_id {
            return;
        }
        self.user_id = user_id;
        self.resubscribe();
    }

    fn resubscribe(&mut self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.subscription = None;
        publish(&self.status, false);

        let Some(user_id) = self.user_id.clone() else {
            return;
        };

        let status = Arc::clone(&self.status);
        let current_generation = Arc::clone(&self.generation);
        let event_id = self.event_id.clone();
        let listener = Box::new(move |result: SnapshotResult| {
            if current_generation.load(Ordering::SeqCst) != generation {
                return;
            }
            let registered = match result {
                Ok(snapshot) => snapshot.exists,
                Err(e) => {
                    tracing::debug!(
                        event_id = %event_id,
                        error = %e,
                        "registration watch failed, treating as not registered"
                    );
                    false
                }
            };
            publish(&status, registered);
        });

        self.subscription = Some(
            self.store
                .watch_registration(&self.event_id, &user_id, listener),
        );
    }
}

impl Drop for RegistrationWatcher {
    fn drop(&mut self) {
        // Invalidate first so a notification racing the release is ignored.
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.subscription = None;
    }
}

fn publish(status: &watch::Sender<bool>, registered: bool) {
    status.send_if_modified(|current| {
        if *current == registered {
            return false;
        }
        *current = registered;
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryRegistrationStore;
    use crate::ports::outbound::{
        MockRegistrationStorePort, RegistrationSnapshot, SnapshotListener, StoreError,
    };
    use std::sync::Mutex;

    fn event_id() -> EventId {
        EventId::new("evt-1").unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    /// Mock store that keeps the listener so tests can push notifications.
    fn capturing_store() -> (MockRegistrationStorePort, Arc<Mutex<Option<SnapshotListener>>>) {
        let slot: Arc<Mutex<Option<SnapshotListener>>> = Arc::new(Mutex::new(None));
        let slot_clone = Arc::clone(&slot);
        let mut store = MockRegistrationStorePort::new();
        store
            .expect_watch_registration()
            .times(1)
            .returning(move |_, _, listener| {
                *slot_clone.lock().unwrap() = Some(listener);
                SubscriptionHandle::detached()
            });
        (store, slot)
    }

    fn push(slot: &Arc<Mutex<Option<SnapshotListener>>>, result: SnapshotResult) {
        let mut guard = slot.lock().unwrap();
        let listener = guard.as_mut().unwrap();
        listener(result);
    }

    mod absent_user_tests {
        use super::*;

        #[test]
        fn absent_user_is_false_without_subscribing() {
            let mut store = MockRegistrationStorePort::new();
            store.expect_watch_registration().never();

            let watcher = RegistrationWatcher::new(Arc::new(store), event_id(), None);

            assert!(!watcher.is_registered());
            assert!(!*watcher.status().borrow());
            assert!(!watcher.is_subscribed());
        }

        #[test]
        fn logging_out_releases_subscription_and_resets() {
            let store = InMemoryRegistrationStore::new();
            store.register(&event_id(), &user("uid-1"));

            let mut watcher =
                RegistrationWatcher::new(Arc::new(store.clone()), event_id(), Some(user("uid-1")));
            assert!(watcher.is_registered());
            assert_eq!(store.watch_count(), 1);

            watcher.set_user(None);
            assert!(!watcher.is_registered());
            assert_eq!(store.watch_count(), 0);
        }
    }

    mod snapshot_tests {
        use super::*;

        #[test]
        fn starts_false_until_first_snapshot() {
            let (store, slot) = capturing_store();
            let watcher = RegistrationWatcher::new(Arc::new(store), event_id(), Some(user("uid-1")));
            assert!(!watcher.is_registered());

            push(&slot, Ok(RegistrationSnapshot::exists()));
            assert!(watcher.is_registered());
        }

        #[test]
        fn deletion_emits_false() {
            let (store, slot) = capturing_store();
            let watcher = RegistrationWatcher::new(Arc::new(store), event_id(), Some(user("uid-1")));
            let mut rx = watcher.status();

            push(&slot, Ok(RegistrationSnapshot::exists()));
            assert!(rx.has_changed().unwrap());
            assert!(*rx.borrow_and_update());

            push(&slot, Ok(RegistrationSnapshot::missing()));
            assert!(rx.has_changed().unwrap());
            assert!(!*rx.borrow_and_update());
        }

        #[test]
        fn error_emits_false_without_surfacing() {
            let (store, slot) = capturing_store();
            let watcher = RegistrationWatcher::new(Arc::new(store), event_id(), Some(user("uid-1")));

            push(&slot, Ok(RegistrationSnapshot::exists()));
            push(&slot, Err(StoreError::PermissionDenied("denied".into())));

            assert!(!watcher.is_registered());
        }

        #[test]
        fn repeated_notifications_are_not_republished() {
            let (store, slot) = capturing_store();
            let watcher = RegistrationWatcher::new(Arc::new(store), event_id(), Some(user("uid-1")));
            let mut rx = watcher.status();

            push(&slot, Ok(RegistrationSnapshot::missing()));
            push(&slot, Err(StoreError::Unavailable("offline".into())));
            assert!(!rx.has_changed().unwrap());

            push(&slot, Ok(RegistrationSnapshot::exists()));
            rx.borrow_and_update();
            push(&slot, Ok(RegistrationSnapshot::exists()));
            assert!(!rx.has_changed().unwrap());
        }
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn drop_releases_subscription() {
            let store = InMemoryRegistrationStore::new();
            let watcher =
                RegistrationWatcher::new(Arc::new(store.clone()), event_id(), Some(user("uid-1")));
            assert_eq!(store.watch_count(), 1);

            drop(watcher);
            assert_eq!(store.watch_count(), 0);
        }

        #[test]
        fn switching_users_watches_new_document() {
            let store = InMemoryRegistrationStore::new();
            store.register(&event_id(), &user("uid-2"));

            let mut watcher =
                RegistrationWatcher::new(Arc::new(store.clone()), event_id(), Some(user("uid-1")));
            assert!(!watcher.is_registered());

            watcher.set_user(Some(user("uid-2")));
            assert!(watcher.is_registered());
            assert_eq!(store.watch_count(), 1);

            // The old user's document no longer affects this watcher.
            store.register(&event_id(), &user("uid-1"));
            store.unregister(&event_id(), &user("uid-1"));
            assert!(watcher.is_registered());
        }

        #[test]
        fn stale_listener_is_ignored_after_resubscribe() {
            let (store, slot) = capturing_store();
            let mut watcher =
                RegistrationWatcher::new(Arc::new(store), event_id(), Some(user("uid-1")));

            watcher.set_user(None);
            push(&slot, Ok(RegistrationSnapshot::exists()));

            assert!(!watcher.is_registered());
        }

        #[test]
        fn live_updates_from_store() {
            let store = InMemoryRegistrationStore::new();
            let watcher =
                RegistrationWatcher::new(Arc::new(store.clone()), event_id(), Some(user("uid-1")));

            store.register(&event_id(), &user("uid-1"));
            assert!(watcher.is_registered());

            store.fail_watches(
                &event_id(),
                &user("uid-1"),
                StoreError::Unavailable("connection lost".into()),
            );
            assert!(!watcher.is_registered());
        }

        #[test]
        fn denied_user_reads_as_not_registered() {
            let store = InMemoryRegistrationStore::new();
            store.register(&event_id(), &user("uid-1"));
            store.deny_user(&user("uid-1"));

            let watcher =
                RegistrationWatcher::new(Arc::new(store.clone()), event_id(), Some(user("uid-1")));

            assert!(!watcher.is_registered());
            assert!(!watcher.is_subscribed());
        }
    }
}
