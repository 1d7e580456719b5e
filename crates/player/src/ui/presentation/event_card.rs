//! Event listing card view model
//!
//! Everything the renderer needs to draw one card in the event grid.

use eventdeck_domain::{DateStyle, Event, TimeFormatter};
use serde::Serialize;

use crate::application::RegistrationWatcher;

pub const REGISTERED_BADGE: &str = "Registered";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCardView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub image_url: String,
    pub detail_href: String,
    pub price_badge: String,
    pub event_type_badge: String,
    pub date_label: String,
    pub time_range: String,
    pub registered: bool,
}

impl EventCardView {
    pub fn build(event: &Event, formatter: &TimeFormatter, registered: bool) -> Self {
        Self {
            id: event.id.to_string(),
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            image_url: event.image_url.clone(),
            detail_href: event.detail_href(),
            price_badge: event.price_label(),
            event_type_badge: event.event_type.to_string(),
            date_label: formatter.format_optional_date(event.date, DateStyle::Long),
            time_range: formatter.format_time_range(&event.start_time, &event.end_time),
            registered,
        }
    }

    /// Builds the card with the watcher's current registration status.
    pub fn from_watcher(event: &Event, formatter: &TimeFormatter, watcher: &RegistrationWatcher) -> Self {
        Self::build(event, formatter, watcher.is_registered())
    }

    pub fn registered_badge(&self) -> Option<&'static str> {
        self.registered.then_some(REGISTERED_BADGE)
    }
}
