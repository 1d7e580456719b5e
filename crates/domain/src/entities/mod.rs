//! Domain entities

mod event;

pub use event::{Event, EventType, CURRENCY_PREFIX};
