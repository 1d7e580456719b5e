//! Presentation layer - view models for the event grid and featured carousel

pub mod event_card;
pub mod featured_carousel;
pub mod state;

pub use event_card::EventCardView;
pub use featured_carousel::{FeaturedCarouselView, StackCardView};
pub use state::FeaturedCarouselState;
