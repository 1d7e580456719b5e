//! Featured events carousel view model
//!
//! The info panel describes the active event; the card stack lists the
//! visible events back to front so the active card is drawn last.

use chrono::{DateTime, Utc};
use eventdeck_domain::{Carousel, DateStyle, Event, TimeFormatter};
use serde::Serialize;

pub const NEAREST_EVENT_BADGE: &str = "Nearest Event";
pub const UPCOMING_EVENT_BADGE: &str = "Upcoming Event";

/// One card in the visual stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackCardView {
    /// 0 = active card at the front
    pub offset: usize,
    pub event_id: String,
    pub title: String,
    pub image_url: String,
    /// Only the front card carries its price badge
    pub price_badge: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturedCarouselView {
    pub active_index: usize,
    pub featured_badge: String,
    pub countdown_label: String,
    pub title: String,
    pub date_label: String,
    pub start_time: String,
    pub location: String,
    pub description: String,
    pub detail_href: String,
    pub stack: Vec<StackCardView>,
}

impl FeaturedCarouselView {
    /// `None` for an empty carousel, which renders nothing.
    pub fn build(
        carousel: &Carousel<Event>,
        formatter: &TimeFormatter,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let active_index = carousel.active_index()?;
        let active = carousel.active_item()?;

        // The list is ordered nearest first.
        let featured_badge = if carousel.is_first_active() {
            NEAREST_EVENT_BADGE
        } else {
            UPCOMING_EVENT_BADGE
        };

        let stack = carousel
            .visible_items()
            .into_iter()
            .map(|visible| StackCardView {
                offset: visible.offset,
                event_id: visible.item.id.to_string(),
                title: visible.item.title.clone(),
                image_url: visible.item.image_url.clone(),
                price_badge: (visible.offset == 0).then(|| visible.item.featured_price_label()),
            })
            .collect();

        Some(Self {
            active_index,
            featured_badge: featured_badge.to_string(),
            countdown_label: formatter.countdown_label(active.date, now),
            title: active.title.clone(),
            date_label: formatter.format_optional_date(active.date, DateStyle::Short),
            start_time: formatter.format_clock_time(&active.start_time),
            location: active.location.clone(),
            description: active.description.clone(),
            detail_href: active.detail_href(),
            stack,
        })
    }
}
