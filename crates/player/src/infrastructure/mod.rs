pub mod auto_advance;
pub mod clock;
pub mod event_source;
pub mod registration_store;

pub use auto_advance::{AutoAdvance, DEFAULT_ROTATE_INTERVAL};
pub use clock::{FixedClock, SystemClock};
pub use event_source::{load_events, EventSourceError};
pub use registration_store::InMemoryRegistrationStore;
