//! Registration store port
//!
//! The document store owns registration records at
//! `events/{event_id}/registrations/{user_id}`. The player only ever asks
//! whether that document exists, through a live push subscription.

use std::fmt;

use eventdeck_domain::{EventId, UserId};
use thiserror::Error;

/// Latest state of one registration document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationSnapshot {
    pub exists: bool,
}

impl RegistrationSnapshot {
    pub fn exists() -> Self {
        Self { exists: true }
    }

    pub fn missing() -> Self {
        Self { exists: false }
    }
}

/// Failures the store may push to a live subscription
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Expected for users without read access to the registrations collection
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Transport or backend failure; reconnection is the store's concern
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type SnapshotResult = Result<RegistrationSnapshot, StoreError>;

/// Callback invoked for every snapshot or error pushed by the store.
pub type SnapshotListener = Box<dyn FnMut(SnapshotResult) + Send + 'static>;

/// Path of the registration document for a (event, user) pair.
pub fn registration_path(event_id: &EventId, user_id: &UserId) -> String {
    format!("events/{event_id}/registrations/{user_id}")
}

/// Scoped ownership of a live subscription
///
/// The subscription is released exactly once, either by [`unsubscribe`] or
/// when the handle is dropped.
///
/// [`unsubscribe`]: SubscriptionHandle::unsubscribe
#[must_use = "dropping the handle releases the subscription immediately"]
pub struct SubscriptionHandle {
    disposer: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl SubscriptionHandle {
    pub fn new(disposer: impl FnOnce() + Send + 'static) -> Self {
        Self {
            disposer: Some(Box::new(disposer)),
        }
    }

    /// A handle with nothing to release.
    pub fn detached() -> Self {
        Self { disposer: None }
    }

    pub fn is_active(&self) -> bool {
        self.disposer.is_some()
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Live access to registration documents
#[cfg_attr(test, mockall::automock)]
pub trait RegistrationStorePort: Send + Sync {
    /// Starts a live watch of one registration document.
    ///
    /// The listener may be called synchronously with the current state before
    /// this returns, and again on every later change or error until the
    /// returned handle is released.
    fn watch_registration(
        &self,
        event_id: &EventId,
        user_id: &UserId,
        listener: SnapshotListener,
    ) -> SubscriptionHandle;
}
