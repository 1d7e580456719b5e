//! Application layer - services composed from domain logic and outbound ports

pub mod registration_watcher;

pub use registration_watcher::RegistrationWatcher;
