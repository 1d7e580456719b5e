//! EventDeck Player crate.
//!
//! View models for the event grid and featured carousel, live registration
//! status, and the adapters the preview runner wires them to.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod ui;

pub use ui::presentation;

pub use application::RegistrationWatcher;
pub use config::{ConfigError, PlayerConfig};
pub use presentation::{EventCardView, FeaturedCarouselState, FeaturedCarouselView};
