//! EventDeck domain: event listings, display-time formatting, and the
//! featured-carousel state machine. Pure types only; no I/O.

pub mod carousel;
pub mod entities;
pub mod error;
pub mod event_time;
pub mod ids;

pub use carousel::{Carousel, VisibleItem, MAX_FEATURED_ITEMS, VISIBLE_DEPTH};
pub use entities::{Event, EventType, CURRENCY_PREFIX};
pub use error::DomainError;
pub use event_time::{Countdown, DateStyle, TimeFormatter, DISPLAY_TIMEZONE};
pub use ids::{EventId, UserId};
