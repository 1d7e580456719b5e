//! View state shared between the renderer and timers

mod featured_carousel_state;

pub use featured_carousel_state::FeaturedCarouselState;
