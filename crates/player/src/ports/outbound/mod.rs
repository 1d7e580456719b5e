//! Outbound ports - interfaces to services the player does not own
//!
//! - `RegistrationStorePort`: live registration-document subscriptions
//! - `ClockPort`: current time for countdown labels

pub mod clock_port;
pub mod registration_store_port;

pub use clock_port::ClockPort;
pub use registration_store_port::{
    registration_path, RegistrationSnapshot, RegistrationStorePort, SnapshotListener,
    SnapshotResult, StoreError, SubscriptionHandle,
};

#[cfg(test)]
pub use clock_port::MockClockPort;
#[cfg(test)]
pub use registration_store_port::MockRegistrationStorePort;
