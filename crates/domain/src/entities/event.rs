//! Event entity - a listed event as stored in the document database
//!
//! Events are read-only on the presentation side: they are supplied by the
//! data-fetch layer and turned into display strings by the view models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, EventId};

/// Currency prefix used on price badges.
pub const CURRENCY_PREFIX: &str = "RM";

/// How attendees take part in an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "online")]
    Online,
    #[serde(rename = "in-person")]
    InPerson,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Online => "online",
            EventType::InPerson => "in-person",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(EventType::Online),
            "in-person" | "in_person" | "inperson" => Ok(EventType::InPerson),
            other => Err(DomainError::parse(format!("Unknown event type: {other}"))),
        }
    }
}

/// An event listing
///
/// `start_time` and `end_time` are local wall-clock strings in `"HH:MM"`
/// form and may be empty. `date` is the absolute instant of the event day;
/// it is only converted to the display timezone when formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub is_free: bool,
    pub event_type: EventType,
}

impl Event {
    pub fn new(id: EventId, title: impl Into<String>, event_type: EventType) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            location: String::new(),
            image_url: String::new(),
            date: None,
            start_time: String::new(),
            end_time: String::new(),
            price: None,
            is_free: false,
            event_type,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_times(mut self, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        self.start_time = start_time.into();
        self.end_time = end_time.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self.is_free = false;
        self
    }

    pub fn free(mut self) -> Self {
        self.is_free = true;
        self
    }

    /// Checks the invariants the store does not enforce.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "event {} has an empty title",
                self.id
            )));
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(DomainError::validation(format!(
                    "event {} has an invalid price: {price}",
                    self.id
                )));
            }
        }
        Ok(())
    }

    /// Price shown to paying attendees; `None` when free or unpriced.
    ///
    /// A zero price on a paid event counts as unpriced.
    fn payable_price(&self) -> Option<f64> {
        if self.is_free {
            return None;
        }
        self.price.filter(|p| *p > 0.0)
    }

    /// Badge text on listing cards: "Free", "RM25.00" or "Paid".
    pub fn price_label(&self) -> String {
        if self.is_free {
            return "Free".to_string();
        }
        match self.payable_price() {
            Some(price) => format!("{CURRENCY_PREFIX}{price:.2}"),
            None => "Paid".to_string(),
        }
    }

    /// Badge text on the featured carousel: "FREE", "RM 25" or "PAID".
    pub fn featured_price_label(&self) -> String {
        if self.is_free {
            return "FREE".to_string();
        }
        match self.payable_price() {
            Some(price) => format!("{CURRENCY_PREFIX} {price}"),
            None => "PAID".to_string(),
        }
    }

    /// Route of the event detail page.
    pub fn detail_href(&self) -> String {
        format!("/event/{}", self.id)
    }
}
