//! Shared featured-carousel state
//!
//! Manual navigation and the auto-advance timer mutate the same carousel
//! through `next()`/`previous()`, so neither can act on a stale index.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use eventdeck_domain::{Carousel, Event, TimeFormatter};

use crate::infrastructure::AutoAdvance;
use crate::ports::outbound::ClockPort;
use crate::ui::presentation::featured_carousel::FeaturedCarouselView;

#[derive(Clone)]
pub struct FeaturedCarouselState {
    carousel: Arc<Mutex<Carousel<Event>>>,
    clock: Arc<dyn ClockPort>,
    formatter: TimeFormatter,
}

impl FeaturedCarouselState {
    /// Keeps the first five events; the rest are dropped.
    pub fn new(events: Vec<Event>, clock: Arc<dyn ClockPort>, formatter: TimeFormatter) -> Self {
        Self {
            carousel: Arc::new(Mutex::new(Carousel::new(events))),
            clock,
            formatter,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Carousel<Event>> {
        self.carousel.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.lock().active_index()
    }

    pub fn next(&self) {
        self.lock().next();
    }

    pub fn previous(&self) {
        self.lock().previous();
    }

    /// Current view, with the countdown computed against the clock.
    pub fn view(&self) -> Option<FeaturedCarouselView> {
        let now = self.clock.now();
        FeaturedCarouselView::build(&self.lock(), &self.formatter, now)
    }

    /// Starts the rotation timer. Keep the handle for as long as the
    /// carousel is on screen.
    pub fn start_auto_advance(&self, period: Duration) -> AutoAdvance {
        AutoAdvance::spawn(Arc::clone(&self.carousel), period)
    }
}
